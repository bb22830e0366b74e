use benchview::cli::commands;
use benchview::cli::{Cli, Commands};
use benchview::config::{self, CliOverrides};
use benchview::logging::init_logging;
use benchview::output::OutputContext;
use benchview::{ReportError, StructuredError};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.json) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = run(&cli) {
        handle_error(&e, cli.json);
    }
}

fn run(cli: &Cli) -> benchview::Result<()> {
    let ctx = OutputContext::from_args(cli);

    if let Commands::Completions(args) = &cli.command {
        return commands::completions::execute(args);
    }

    let config = config::load_config(Path::new("."), &build_cli_overrides(cli))?;

    match &cli.command {
        Commands::Show(args) => commands::show::execute(args, &config, &ctx),
        Commands::Summary(args) => commands::summary::execute(args, &ctx),
        Commands::Plot(args) => commands::plot::execute(args, &config, &ctx),
        Commands::Validate(args) => commands::validate::execute(args, &config, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Handle errors with structured output support.
///
/// With --json, outputs structured JSON to stderr. Otherwise outputs a
/// human-readable `[ERROR]` line, colored when stderr is a terminal.
fn handle_error(err: &ReportError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    if json_mode {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}

fn build_cli_overrides(cli: &Cli) -> CliOverrides {
    let mut overrides = CliOverrides::default();
    match &cli.command {
        Commands::Show(args) => {
            overrides.expected_schema_version = args.expected_schema_version;
        }
        Commands::Plot(args) => {
            overrides.out_dir.clone_from(&args.out_dir);
            overrides.scale = args.scale;
            overrides.no_hw_info = args.no_hw_info.then_some(true);
        }
        Commands::Validate(args) => {
            overrides.schema_dir.clone_from(&args.schema_dir);
        }
        Commands::Summary(_) | Commands::Completions(_) => {}
    }
    overrides
}
