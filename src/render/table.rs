//! Aligned table rendering for benchmark rows.

use crate::model::{BenchmarkDocument, BenchmarkRow, Operation, display_scalar};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Column separator between aligned cells.
const GUTTER: &str = "  ";

/// Table headers for an optional operation filter.
///
/// The memory column appears only when no filter is set.
#[must_use]
pub fn benchmark_headers(filter: Option<Operation>) -> Vec<&'static str> {
    let mut headers = vec!["Structure"];
    headers.extend(Operation::selected(filter).iter().map(Operation::header));
    if filter.is_none() {
        headers.push("Memory(bytes)");
    }
    headers
}

/// Cells for one row, matching [`benchmark_headers`].
#[must_use]
pub fn benchmark_cells(row: &BenchmarkRow, filter: Option<Operation>) -> Vec<String> {
    let mut cells = vec![row.structure.clone()];
    cells.extend(
        Operation::selected(filter)
            .into_iter()
            .map(|op| row.duration(op).format(2)),
    );
    if filter.is_none() {
        cells.push(row.memory_bytes.render());
    }
    cells
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(fill))
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(GUTTER);
    line.trim_end().to_string()
}

/// Left-justify every column to its widest cell (header included).
///
/// Widths are display widths, so wide characters line up in a terminal.
/// Trailing padding is trimmed from each line.
#[must_use]
pub fn align_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&render_line(headers.iter().map(|h| h.as_ref()), &widths));
    out.push('\n');
    for row in rows {
        out.push_str(&render_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

/// `Summary: structures=<n> seed=<seed> size=<size> runs=<runs>`.
#[must_use]
pub fn summary_footer(doc: &BenchmarkDocument) -> String {
    let meta = &doc.meta;
    let or = |value: Option<&serde_json::Value>, fallback: &str| {
        value.map_or_else(|| fallback.to_string(), display_scalar)
    };
    format!(
        "Summary: structures={} seed={} size={} runs={}",
        doc.results.len(),
        or(meta.seed.as_ref(), "unknown"),
        or(meta.size.as_ref(), "-"),
        or(meta.runs.as_ref(), "-"),
    )
}

/// Render a benchmark document as an aligned table, one line per row.
#[must_use]
pub fn format_benchmark_table(
    doc: &BenchmarkDocument,
    filter: Option<Operation>,
    with_summary: bool,
) -> String {
    let headers = benchmark_headers(filter);
    let rows: Vec<Vec<String>> = doc
        .results
        .iter()
        .map(|row| benchmark_cells(row, filter))
        .collect();

    let mut out = align_table(&headers, &rows);
    if with_summary {
        let _ = writeln!(out, "{}", summary_footer(doc));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Measure, MemoryCell, Meta};
    use serde_json::json;

    fn row(name: &str, insert: f64, memory: MemoryCell) -> BenchmarkRow {
        BenchmarkRow {
            structure: name.to_string(),
            insert_ms: Measure::Value(insert),
            search_ms: Measure::Unavailable,
            remove_ms: Measure::Value(0.5),
            memory_bytes: memory,
        }
    }

    fn doc() -> BenchmarkDocument {
        BenchmarkDocument {
            meta: Meta {
                schema_version: Some(1),
                seed: Some(json!(42)),
                size: Some(json!(1000)),
                ..Meta::default()
            },
            results: vec![
                row("array", 1.0, MemoryCell::Bytes(4096)),
                row("hash_map", 12.346, MemoryCell::Missing),
            ],
        }
    }

    #[test]
    fn headers_follow_filter() {
        assert_eq!(
            benchmark_headers(None),
            vec!["Structure", "Insert(ms)", "Search(ms)", "Remove(ms)", "Memory(bytes)"]
        );
        assert_eq!(
            benchmark_headers(Some(Operation::Search)),
            vec!["Structure", "Search(ms)"]
        );
    }

    #[test]
    fn full_table_layout() {
        let out = format_benchmark_table(&doc(), None, false);
        insta::assert_snapshot!(out.trim_end(), @r"
        Structure  Insert(ms)  Search(ms)  Remove(ms)  Memory(bytes)
        array      1.00        -           0.50        4096
        hash_map   12.35       -           0.50        0
        ");
    }

    #[test]
    fn filtered_table_with_summary() {
        let out = format_benchmark_table(&doc(), Some(Operation::Insert), true);
        insta::assert_snapshot!(out.trim_end(), @r"
        Structure  Insert(ms)
        array      1.00
        hash_map   12.35
        Summary: structures=2 seed=42 size=1000 runs=-
        ");
    }

    #[test]
    fn filter_changes_columns_not_rows() {
        let all = format_benchmark_table(&doc(), None, false);
        let one = format_benchmark_table(&doc(), Some(Operation::Remove), false);
        assert_eq!(all.lines().count(), one.lines().count());
    }

    #[test]
    fn alignment_uses_display_width() {
        let out = align_table(&["Name", "V"], &[vec!["日本".to_string(), "1".to_string()]]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Name  V");
        assert_eq!(lines[1], "日本  1");
    }

    #[test]
    fn footer_defaults() {
        let empty = BenchmarkDocument::default();
        assert_eq!(
            summary_footer(&empty),
            "Summary: structures=0 seed=unknown size=- runs=-"
        );
    }
}
