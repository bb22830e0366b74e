//! Summary command: plain-text digest of the harness CSV outputs.

use super::{load_csv_document, load_csv_reporting};
use crate::aggregate::{DISPLAY_CAP, aggregate_series, summarize};
use crate::classify::DocumentKind;
use crate::cli::SummaryArgs;
use crate::error::{ReportError, Result};
use crate::model::{CrossoverDocument, CrossoverField, Document, Operation, SeriesDocument};
use crate::output::OutputContext;
use crate::render::{format_bench_csv_summary, format_crossover_groups, format_series_summary};

pub const BENCH_HEADING: &str = "=== Benchmark Summary ===";
pub const SERIES_HEADING: &str = "=== Series Summary (latest size, median insert) ===";
pub const CROSSOVER_HEADING: &str = "=== Crossover Points (approx) ===";

fn section(heading: &str, body: &str) -> String {
    format!("\n{heading}\n{body}")
}

fn wrong_kind(found: &Document, expected: DocumentKind) -> ReportError {
    let seen = match found {
        Document::Benchmark(_) => DocumentKind::Benchmark,
        Document::Series(_) => DocumentKind::Series,
        Document::Crossover(cross) => DocumentKind::Crossover(cross.field),
    };
    ReportError::Config(format!("expected a {expected} CSV, found {seen} columns"))
}

fn series_body(doc: Option<Document>) -> Result<String> {
    let series = match doc {
        None => SeriesDocument::default(),
        Some(Document::Series(series)) => series,
        Some(other) => return Err(wrong_kind(&other, DocumentKind::Series)),
    };
    Ok(format_series_summary(
        &aggregate_series(&series.points, Operation::Insert),
        Operation::Insert,
    ))
}

fn crossover_body(doc: Option<Document>) -> Result<String> {
    let cross = match doc {
        None => CrossoverDocument::default(),
        Some(Document::Crossover(cross)) => cross,
        Some(other) => return Err(wrong_kind(&other, DocumentKind::Crossover(CrossoverField::default()))),
    };
    Ok(format_crossover_groups(&summarize(&cross.rows, DISPLAY_CAP)))
}

/// Execute the summary command.
///
/// Missing CSV files summarize as `(no data)`.
///
/// # Errors
///
/// Returns an error if a CSV exists but cannot be read, or its columns belong
/// to a different kind of result.
pub fn execute(args: &SummaryArgs, ctx: &OutputContext) -> Result<()> {
    let bench = load_csv_reporting(&args.bench_csv, ctx)?;
    let mut out = section(BENCH_HEADING, &format_bench_csv_summary(&bench));

    if let Some(path) = &args.series_csv {
        out.push_str(&section(SERIES_HEADING, &series_body(load_csv_document(path, ctx)?)?));
    }

    let cross = load_csv_document(&args.cross_csv, ctx)?;
    out.push_str(&section(CROSSOVER_HEADING, &crossover_body(cross)?));

    ctx.print(&out);
    Ok(())
}
