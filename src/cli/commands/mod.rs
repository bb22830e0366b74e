//! Command implementations.

pub mod completions;
pub mod plot;
pub mod show;
pub mod summary;
pub mod validate;

use crate::classify::document_from_csv;
use crate::error::Result;
use crate::model::Document;
use crate::output::OutputContext;
use crate::reader::{CsvTable, load_csv};
use std::path::Path;

/// Load a harness CSV, warning when the file does not exist.
pub(crate) fn load_csv_reporting(path: &Path, ctx: &OutputContext) -> Result<CsvTable> {
    let table = load_csv(path)?;
    if !table.present {
        ctx.warning(&format!("File not found: {}", path.display()));
    }
    Ok(table)
}

/// Load and classify a harness CSV; `None` for a missing or empty file.
pub(crate) fn load_csv_document(path: &Path, ctx: &OutputContext) -> Result<Option<Document>> {
    let table = load_csv_reporting(path, ctx)?;
    document_from_csv(&table)
}
