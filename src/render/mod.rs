//! Text renderings of benchmark documents.
//!
//! - [`table`] - aligned tables with a per-operation column projection
//! - [`csv`] - condensed CSV export with field escaping
//! - [`text`] - series, crossover and CSV-summary views
//!
//! Renderers return `String`s; callers decide where they are printed.

pub mod csv;
pub mod table;
pub mod text;

pub use csv::{condensed_headers, escape_field, format_benchmark_csv, format_benchmark_row};
pub use table::{
    align_table, benchmark_cells, benchmark_headers, format_benchmark_table, summary_footer,
};
pub use text::{
    NO_DATA, format_bench_csv_summary, format_crossover_groups, format_series_summary,
};
