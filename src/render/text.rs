//! Plain-text views for series aggregates, crossover groups and raw
//! benchmark CSV tables.

use super::table::align_table;
use crate::aggregate::{CrossoverGroup, SeriesSummary};
use crate::model::{Measure, Operation, parse_count_text};
use crate::reader::CsvTable;
use std::fmt::Write;

/// Placeholder body for an empty dataset.
pub const NO_DATA: &str = "(no data)";

/// Aligned table of latest and median values per structure.
#[must_use]
pub fn format_series_summary(summaries: &[SeriesSummary], op: Operation) -> String {
    if summaries.is_empty() {
        return format!("{NO_DATA}\n");
    }
    let headers = [
        "Structure".to_string(),
        "LatestSize".to_string(),
        format!("Latest{}", op.header()),
        format!("Median{}", op.header()),
    ];
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            vec![
                s.structure.clone(),
                s.latest_size.map_or_else(|| "-".to_string(), |n| n.to_string()),
                s.latest.format(2),
                s.median.format(2),
            ]
        })
        .collect();
    align_table(&headers, &rows)
}

/// Crossover groups as `<op>:` blocks of `  a vs b -> ~N elements` lines.
#[must_use]
pub fn format_crossover_groups(groups: &[CrossoverGroup]) -> String {
    if groups.is_empty() {
        return format!("{NO_DATA}\n");
    }
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "{}:", group.operation);
        for (size, pair) in group.labelled_sizes() {
            let _ = writeln!(out, "  {pair} -> ~{size} elements");
        }
    }
    out
}

fn bench_line(row: &std::collections::HashMap<String, String>) -> Option<String> {
    let structure = row.get("structure")?;
    let ms = |column: &str| match Measure::parse(CsvTable::cell(row, column)) {
        Measure::Value(v) => Some(v),
        Measure::Unavailable => None,
    };
    let insert = ms("insert_ms_mean")?;
    let search = ms("search_ms_mean")?;
    let remove = ms("remove_ms_mean")?;
    let memory = parse_count_text(CsvTable::cell(row, "memory_bytes"))?;
    Some(format!(
        "- {structure}: insert={insert:.3} ms, search={search:.3} ms, remove={remove:.3} ms, mem={memory} bytes"
    ))
}

/// One line per benchmark CSV row with three-decimal timings.
///
/// A row with a missing or unparseable value is echoed as its raw
/// `column=value` cells instead.
#[must_use]
pub fn format_bench_csv_summary(table: &CsvTable) -> String {
    if table.is_empty() {
        return format!("{NO_DATA}\n");
    }
    let mut out = String::new();
    for row in &table.rows {
        let line = bench_line(row).unwrap_or_else(|| {
            let raw = table
                .headers
                .iter()
                .map(|h| format!("{h}={}", CsvTable::cell(row, h)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("- {raw}")
        });
        out.push_str(&line);
        out.push('\n');
    }
    out
}
