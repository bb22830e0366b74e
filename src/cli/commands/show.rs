//! Show command implementation.

use crate::aggregate::{CrossoverGroup, DISPLAY_CAP, SeriesSummary, aggregate_series, summarize};
use crate::classify::parse_document;
use crate::cli::ShowArgs;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::guard::SchemaGuard;
use crate::model::{BenchmarkRow, CrossoverField, Document, Meta, Operation};
use crate::output::OutputContext;
use crate::reader::load_json;
use crate::render::{
    format_benchmark_csv, format_benchmark_table, format_crossover_groups, format_series_summary,
};
use serde::Serialize;
use tracing::debug;

pub const SERIES_HEADING: &str = "Series summary (using latest size + median insert time):";
pub const CROSSOVER_HEADING: &str = "Crossover points:";

/// Machine-readable view of a shown document.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShowReport<'a> {
    Benchmark {
        meta: &'a Meta,
        schema_version_ok: bool,
        results: &'a [BenchmarkRow],
    },
    Series {
        summaries: Vec<SeriesSummary>,
    },
    Crossover {
        field: CrossoverField,
        groups: Vec<CrossoverGroup>,
    },
}

/// Render a classified document the way `show` prints it.
#[must_use]
pub fn format_document(doc: &Document, args: &ShowArgs) -> String {
    match doc {
        Document::Benchmark(bench) if args.csv => format_benchmark_csv(&bench.results, args.operation),
        Document::Benchmark(bench) => format_benchmark_table(bench, args.operation, args.summary),
        Document::Series(series) => format!(
            "{SERIES_HEADING}\n{}",
            format_series_summary(&aggregate_series(&series.points, Operation::Insert), Operation::Insert)
        ),
        Document::Crossover(cross) => format!(
            "{CROSSOVER_HEADING}\n{}",
            format_crossover_groups(&summarize(&cross.rows, DISPLAY_CAP))
        ),
    }
}

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or matches no known
/// format. Nothing is printed in either case.
pub fn execute(args: &ShowArgs, config: &ReportConfig, ctx: &OutputContext) -> Result<()> {
    let blob = load_json(&args.path)?;
    let doc = parse_document(&blob)?;
    debug!(path = %args.path.display(), "Showing document");

    let mut schema_version_ok = true;
    match &doc {
        Document::Benchmark(bench) => {
            let check = SchemaGuard::new(config.expected_schema_version).check(&bench.meta);
            if let Some(warning) = check.warning() {
                schema_version_ok = false;
                ctx.warning(&warning);
            }
        }
        Document::Crossover(cross) => {
            ctx.note(&format!(
                "crossover document uses field '{}'",
                cross.field.as_str()
            ));
        }
        Document::Series(_) => {}
    }

    if ctx.is_json() {
        let report = match &doc {
            Document::Benchmark(bench) => ShowReport::Benchmark {
                meta: &bench.meta,
                schema_version_ok,
                results: &bench.results,
            },
            Document::Series(series) => ShowReport::Series {
                summaries: aggregate_series(&series.points, Operation::Insert),
            },
            Document::Crossover(cross) => ShowReport::Crossover {
                field: cross.field,
                groups: summarize(&cross.rows, DISPLAY_CAP),
            },
        };
        return ctx.json(&report);
    }

    ctx.print(&format_document(&doc, args));
    Ok(())
}
