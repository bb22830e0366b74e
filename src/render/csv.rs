//! Condensed CSV export of benchmark rows.
//!
//! The header is the table header lower-cased with unit suffixes removed, so
//! the unfiltered export reads `structure,insert,search,remove,memory`.

use super::table::{benchmark_cells, benchmark_headers};
use crate::model::{BenchmarkRow, Operation};

/// Escape a CSV field value.
///
/// Wraps in double quotes if the value contains commas, quotes, or newlines.
/// Doubles any existing quotes within the value.
#[must_use]
pub fn escape_field(value: &str) -> String {
    let needs_quoting = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');

    if needs_quoting {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Condensed header names for an optional operation filter.
#[must_use]
pub fn condensed_headers(filter: Option<Operation>) -> Vec<String> {
    benchmark_headers(filter)
        .into_iter()
        .map(|h| h.to_lowercase().replace("(ms)", "").replace("(bytes)", ""))
        .collect()
}

/// Format a single row as a condensed CSV line.
#[must_use]
pub fn format_benchmark_row(row: &BenchmarkRow, filter: Option<Operation>) -> String {
    benchmark_cells(row, filter)
        .iter()
        .map(|cell| escape_field(cell))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format rows as a complete condensed CSV string.
#[must_use]
pub fn format_benchmark_csv(rows: &[BenchmarkRow], filter: Option<Operation>) -> String {
    let mut out = condensed_headers(filter).join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&format_benchmark_row(row, filter));
        out.push('\n');
    }
    out
}
