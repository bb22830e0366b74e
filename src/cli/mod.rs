//! CLI definitions and entry point.

use crate::model::Operation;
use crate::scale::ScaleMode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Tables, summaries, charts and schema checks for data-structure benchmark
/// results
#[derive(Parser, Debug)]
#[command(name = "benchview", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON (show, validate, errors)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (report bodies only, no status lines)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a benchmark, series or crossover JSON document as text
    Show(ShowArgs),

    /// Summarize the harness CSV outputs
    Summary(SummaryArgs),

    /// Write SVG charts for CSV and JSON results
    Plot(PlotArgs),

    /// Check JSON documents against their schemas
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    /// JSON document to render
    pub path: PathBuf,

    /// Condensed CSV instead of an aligned table (benchmark documents)
    #[arg(long)]
    pub csv: bool,

    /// Append the run summary line (benchmark tables)
    #[arg(long)]
    pub summary: bool,

    /// Restrict benchmark columns to one operation
    #[arg(long, value_enum)]
    pub operation: Option<Operation>,

    /// Expected `meta.schema_version` [config: expected-schema-version]
    #[arg(long)]
    pub expected_schema_version: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// Benchmark results CSV
    #[arg(long, default_value = "build/benchmark_results.csv")]
    pub bench_csv: PathBuf,

    /// Series results CSV (skipped when not given)
    #[arg(long)]
    pub series_csv: Option<PathBuf>,

    /// Crossover results CSV
    #[arg(long, default_value = "build/crossover_results.csv")]
    pub cross_csv: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    /// Benchmark results CSV
    #[arg(long, default_value = "build/benchmark_results.csv")]
    pub bench_csv: PathBuf,

    /// Series results CSV (skipped when not given)
    #[arg(long)]
    pub series_csv: Option<PathBuf>,

    /// Crossover results CSV
    #[arg(long, default_value = "build/crossover_results.csv")]
    pub cross_csv: PathBuf,

    /// Additional JSON documents to chart (any of the three kinds)
    #[arg(long = "input", value_name = "JSON")]
    pub inputs: Vec<PathBuf>,

    /// Directory for the SVG files [config: out-dir, default build/plots]
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Value axis scale [config: scale, default auto]
    #[arg(long, value_enum)]
    pub scale: Option<ScaleMode>,

    /// Free-text note added under every chart (repeatable)
    #[arg(long = "note", value_name = "TEXT")]
    pub notes: Vec<String>,

    /// Leave the hardware line off the charts
    #[arg(long)]
    pub no_hw_info: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Directory holding the schema documents [config: schema-dir]
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,

    /// JSON documents to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: ShellType,

    /// Output directory (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plot_flags_parse() {
        let cli = Cli::parse_from([
            "benchview", "plot", "--scale", "mid", "--note", "a", "--note", "b", "--input",
            "x.json", "--no-hw-info",
        ]);
        let Commands::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        assert_eq!(args.scale, Some(ScaleMode::Mid));
        assert_eq!(args.notes, vec!["a", "b"]);
        assert_eq!(args.inputs, vec![PathBuf::from("x.json")]);
        assert!(args.no_hw_info);
        assert_eq!(args.bench_csv, PathBuf::from("build/benchmark_results.csv"));
    }

    #[test]
    fn show_operation_filter_parses() {
        let cli = Cli::parse_from(["benchview", "--json", "show", "r.json", "--operation", "search"]);
        assert!(cli.json);
        let Commands::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.operation, Some(Operation::Search));
    }

    #[test]
    fn validate_requires_files() {
        assert!(Cli::try_parse_from(["benchview", "validate"]).is_err());
    }
}
