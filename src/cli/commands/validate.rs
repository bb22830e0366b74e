//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::output::OutputContext;
use crate::validate::{BatchReport, JsonSchemaValidator, SchemaValidator, ValidationDispatcher};
use std::path::Path;
use tracing::debug;

/// Validate `files` against the schemas in `schema_dir`, streaming one line
/// per file unless in JSON mode.
pub fn run_batch<V: SchemaValidator>(
    validator: &V,
    schema_dir: &Path,
    files: &[impl AsRef<Path>],
    ctx: &OutputContext,
) -> BatchReport {
    let dispatcher = ValidationDispatcher::new(validator, schema_dir);
    dispatcher.validate_batch(files, |verdict| {
        if verdict.passed() {
            ctx.print(&format!("{}\n", verdict.line()));
        } else {
            ctx.failure(&verdict.line());
        }
    })
}

/// Execute the validate command.
///
/// # Errors
///
/// Returns `ValidationFailed` if any file failed.
pub fn execute(args: &ValidateArgs, config: &ReportConfig, ctx: &OutputContext) -> Result<()> {
    debug!(schema_dir = %config.schema_dir.display(), files = args.files.len(), "Validating");
    let report = run_batch(&JsonSchemaValidator, &config.schema_dir, &args.files, ctx);
    ctx.json(&report)?;

    if report.all_passed() {
        Ok(())
    } else {
        Err(ReportError::ValidationFailed {
            failed: report.failed(),
            total: report.files.len(),
        })
    }
}
