//! Error types and handling for `benchview`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Provides recovery hints for user-facing errors
//! - Maps every variant onto a stable exit code (see [`ErrorCode`])
//!
//! Field-level problems (an unparsable cell, a missing key) are *not* errors:
//! they surface as placeholder values in [`crate::model::Measure`].

mod structured;

pub use structured::{ErrorCode, StructuredError};

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `benchview` operations.
#[derive(Error, Debug)]
pub enum ReportError {
    // === I/O and parse errors ===
    /// Input file does not exist.
    #[error("unable to open '{path}': file not found")]
    FileNotFound { path: PathBuf },

    /// Input file exists but is not valid JSON.
    #[error("JSON decode failed for '{path}': {reason}")]
    JsonParse { path: PathBuf, reason: String },

    /// Input file exists but is not readable CSV.
    #[error("CSV read failed for '{path}': {reason}")]
    CsvParse { path: PathBuf, reason: String },

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Format errors ===
    /// Document loaded but none of the known shapes matched.
    #[error(
        "unrecognized format; expected benchmark, series, or crossover document (fields seen: {})",
        display_fields(.fields)
    )]
    UnrecognizedFormat { fields: Vec<String> },

    // === Validation errors ===
    /// At least one file in a validation batch failed.
    #[error("validation failed for {failed} of {total} file(s)")]
    ValidationFailed { failed: usize, total: usize },

    // === Configuration errors ===
    /// Configuration value or file error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing error in a config file.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === Chart errors ===
    /// The binary was built without a charting backend.
    #[error("charting backend is not available in this build")]
    ChartBackendUnavailable,

    /// The charting backend failed to produce a chart.
    #[error("failed to render chart '{path}': {reason}")]
    Render { path: PathBuf, reason: String },
}

fn display_fields(fields: &[String]) -> String {
    if fields.is_empty() {
        "none".to_string()
    } else {
        fields.join(", ")
    }
}

impl ReportError {
    /// Can the user fix this without code changes?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::JsonParse { .. }
                | Self::CsvParse { .. }
                | Self::UnrecognizedFormat { .. }
                | Self::ValidationFailed { .. }
                | Self::Config(_)
                | Self::ChartBackendUnavailable
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::FileNotFound { .. } => Some("Check the path; the harness writes results under build/"),
            Self::UnrecognizedFormat { .. } => {
                Some("Expected a top-level 'results' + 'meta', 'series', or 'crossover(s)' field")
            }
            Self::ChartBackendUnavailable => {
                Some("Rebuild with the default `charts` feature enabled")
            }
            Self::ValidationFailed { .. } => Some("See the [FAIL] lines above for details"),
            _ => None,
        }
    }
}

/// Result type using `ReportError`.
pub type Result<T> = std::result::Result<T, ReportError>;
