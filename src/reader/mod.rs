//! Record reader: loads JSON documents and CSV tables into memory.
//!
//! JSON inputs are the primary, strict path: a missing or malformed file is
//! an error. CSV inputs come from the harness's optional exports, so a missing
//! CSV file yields an empty table (callers print `(no data)`).

use crate::error::{ReportError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A CSV table: header names plus one string map per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
    /// False when the file did not exist.
    pub present: bool,
}

impl CsvTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup; missing columns read as empty.
    #[must_use]
    pub fn cell<'a>(row: &'a HashMap<String, String>, column: &str) -> &'a str {
        row.get(column).map_or("", String::as_str)
    }
}

/// Load and parse a JSON document.
///
/// # Errors
///
/// Returns `FileNotFound` if the path does not exist, `Io` if it cannot be
/// read, and `JsonParse` if the contents are not valid JSON.
pub fn load_json(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ReportError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReportError::Io(err)
        }
    })?;

    let value: Value = serde_json::from_str(&contents).map_err(|err| ReportError::JsonParse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "Loaded JSON document");
    Ok(value)
}

/// Load a CSV table with a header row.
///
/// Rows with fewer cells than the header are kept; absent cells read as empty.
///
/// # Errors
///
/// Returns `CsvParse` if the file exists but is not readable CSV.
pub fn load_csv(path: &Path) -> Result<CsvTable> {
    if !path.exists() {
        debug!(path = %path.display(), "CSV file missing; using empty table");
        return Ok(CsvTable {
            path: path.to_path_buf(),
            ..CsvTable::default()
        });
    }

    let csv_err = |err: csv::Error| ReportError::CsvParse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let row: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }

    debug!(path = %path.display(), rows = rows.len(), "Loaded CSV table");
    Ok(CsvTable {
        path: path.to_path_buf(),
        headers,
        rows,
        present: true,
    })
}
