//! Reductions over series and crossover documents.
//!
//! Both aggregators are pure: they borrow the loaded rows and return new
//! values, preserving first-appearance order of their grouping keys.

pub mod crossover;
pub mod series;

pub use crossover::{CrossoverGroup, DISPLAY_CAP, summarize};
pub use series::{SeriesLine, SeriesSummary, aggregate_series, median, series_lines};
