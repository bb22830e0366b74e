//! Plot command: SVG charts for CSV and JSON results.

use super::load_csv_document;
use crate::chart::{ChartBackend, ChartComposer, Footnotes, default_backend};
use crate::classify::parse_document;
use crate::cli::PlotArgs;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::model::Document;
use crate::output::OutputContext;
use crate::reader::load_json;
use std::path::PathBuf;
use tracing::debug;

/// Everything one plot run draws, grouped by kind in drawing order.
#[derive(Debug, Default)]
struct PlotInputs {
    benchmark: Vec<Document>,
    series: Vec<Document>,
    crossover: Vec<Document>,
}

impl PlotInputs {
    fn push(&mut self, doc: Document) {
        match doc {
            Document::Benchmark(_) => self.benchmark.push(doc),
            Document::Series(_) => self.series.push(doc),
            Document::Crossover(_) => self.crossover.push(doc),
        }
    }

    fn hardware(&self) -> Option<String> {
        self.benchmark.iter().find_map(|doc| match doc {
            Document::Benchmark(bench) => bench.meta.hardware_summary(),
            Document::Series(_) | Document::Crossover(_) => None,
        })
    }
}

fn has_rows(doc: &Document) -> bool {
    match doc {
        Document::Benchmark(bench) => !bench.results.is_empty(),
        Document::Series(series) => !series.points.is_empty(),
        Document::Crossover(cross) => !cross.rows.is_empty(),
    }
}

fn gather(args: &PlotArgs, ctx: &OutputContext) -> Result<PlotInputs> {
    let mut inputs = PlotInputs::default();

    let mut csv_paths = vec![&args.bench_csv];
    csv_paths.extend(args.series_csv.as_ref());
    csv_paths.push(&args.cross_csv);
    for path in csv_paths {
        if let Some(doc) = load_csv_document(path, ctx)? {
            inputs.push(doc);
        }
    }

    for path in &args.inputs {
        let doc = parse_document(&load_json(path)?)?;
        debug!(path = %path.display(), "Queued JSON input");
        inputs.push(doc);
    }

    Ok(inputs)
}

/// Draw every queued document through `backend`.
///
/// Later inputs of the same kind overwrite earlier chart files.
///
/// # Errors
///
/// Propagates backend and output-directory failures.
pub fn draw<B: ChartBackend>(
    backend: &mut B,
    args: &PlotArgs,
    config: &ReportConfig,
    ctx: &OutputContext,
) -> Result<Vec<PathBuf>> {
    let inputs = gather(args, ctx)?;

    let mut footnotes = Footnotes {
        hardware: None,
        notes: config.notes.iter().chain(&args.notes).cloned().collect(),
    };
    if !(config.no_hw_info || args.no_hw_info) {
        footnotes.hardware = inputs.hardware();
    }

    let mut composer = ChartComposer::new(backend, config.out_dir.clone(), config.scale)
        .with_footnotes(&footnotes);
    let mut written = Vec::new();

    let series_requested = args.series_csv.is_some() || !inputs.series.is_empty();
    for (docs, requested, empty_warning) in [
        (&inputs.benchmark, true, "No benchmark rows to plot"),
        (&inputs.series, series_requested, "No series rows to plot"),
        (&inputs.crossover, true, "No crossover rows to plot"),
    ] {
        let mut drawn = false;
        for doc in docs.iter().filter(|doc| has_rows(doc)) {
            let paths = match doc {
                Document::Benchmark(bench) => composer.benchmark(bench)?,
                Document::Series(series) => composer.series(series)?,
                Document::Crossover(cross) => composer.crossover(cross)?,
            };
            for path in &paths {
                ctx.info(&format!("Wrote {}", path.display()));
            }
            drawn = true;
            written.extend(paths);
        }
        if requested && !drawn {
            ctx.warning(empty_warning);
        }
    }

    Ok(written)
}

/// Execute the plot command.
///
/// # Errors
///
/// Returns `ChartBackendUnavailable` before reading anything when the binary
/// has no charting backend; otherwise propagates load and render failures.
pub fn execute(args: &PlotArgs, config: &ReportConfig, ctx: &OutputContext) -> Result<()> {
    let mut backend = default_backend()?;
    let written = draw(&mut backend, args, config, ctx)?;
    debug!(count = written.len(), "Plot run complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{BarChart, LineChart, ScatterChart};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        files: Vec<String>,
        footnotes: Vec<Vec<String>>,
    }

    impl Recorder {
        fn record(&mut self, path: &Path, footnotes: &[String]) {
            self.files.push(path.file_name().unwrap().to_string_lossy().into_owned());
            self.footnotes.push(footnotes.to_vec());
        }
    }

    impl ChartBackend for Recorder {
        fn bar_chart(&mut self, path: &Path, chart: &BarChart) -> Result<()> {
            self.record(path, &chart.frame.footnotes);
            Ok(())
        }

        fn line_chart(&mut self, path: &Path, chart: &LineChart) -> Result<()> {
            self.record(path, &chart.frame.footnotes);
            Ok(())
        }

        fn scatter_chart(&mut self, path: &Path, chart: &ScatterChart) -> Result<()> {
            self.record(path, &chart.frame.footnotes);
            Ok(())
        }
    }

    fn args(dir: &Path) -> PlotArgs {
        PlotArgs {
            bench_csv: dir.join("benchmark_results.csv"),
            series_csv: None,
            cross_csv: dir.join("crossover_results.csv"),
            inputs: Vec::new(),
            out_dir: None,
            scale: None,
            notes: vec!["pinned".to_string()],
            no_hw_info: false,
        }
    }

    fn config(dir: &Path) -> ReportConfig {
        ReportConfig {
            out_dir: dir.join("plots"),
            ..ReportConfig::default()
        }
    }

    #[test]
    fn csv_inputs_produce_charts_in_order() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("benchmark_results.csv"),
            "structure,insert_ms_mean,search_ms_mean,remove_ms_mean,memory_bytes\narray,1.0,2.0,3.0,64\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("crossover_results.csv"),
            "operation,a,b,size_at_crossover\ninsert,array,list,128\n",
        )
        .unwrap();

        let mut recorder = Recorder::default();
        let ctx = OutputContext::from_flags(false, true);
        let written = draw(&mut recorder, &args(temp.path()), &config(temp.path()), &ctx).unwrap();

        assert_eq!(written.len(), recorder.files.len());
        assert_eq!(recorder.files.first().map(String::as_str), Some("benchmark_summary.svg"));
        assert_eq!(recorder.files.last().map(String::as_str), Some("crossover_points.svg"));
        assert!(recorder.footnotes.iter().all(|f| f == &["note: pinned".to_string()]));
    }

    #[test]
    fn hardware_line_comes_from_benchmark_json() {
        let temp = TempDir::new().unwrap();
        let json = temp.path().join("bench.json");
        fs::write(
            &json,
            r#"{"meta": {"schema_version": 1, "cpu_model": "Ryzen 9", "cores": 16},
                "results": [{"structure": "array", "insert_ms_mean": 1.0}]}"#,
        )
        .unwrap();

        let mut plot_args = args(temp.path());
        plot_args.inputs.push(json);
        let mut recorder = Recorder::default();
        let ctx = OutputContext::from_flags(false, true);
        draw(&mut recorder, &plot_args, &config(temp.path()), &ctx).unwrap();

        let first = &recorder.footnotes[0];
        assert!(first[0].contains("Ryzen 9"), "{first:?}");
        assert_eq!(first.last().map(String::as_str), Some("note: pinned"));

        plot_args.no_hw_info = true;
        let mut quiet = Recorder::default();
        draw(&mut quiet, &plot_args, &config(temp.path()), &ctx).unwrap();
        assert_eq!(quiet.footnotes[0], vec!["note: pinned".to_string()]);
    }

    #[test]
    fn missing_inputs_draw_nothing() {
        let temp = TempDir::new().unwrap();
        let mut recorder = Recorder::default();
        let ctx = OutputContext::from_flags(false, true);
        let written = draw(&mut recorder, &args(temp.path()), &config(temp.path()), &ctx).unwrap();
        assert!(written.is_empty());
        assert!(recorder.files.is_empty());
    }
}
