//! Structured error output for automated callers.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Stable exit codes per category
//! - Hints for self-correction
//! - Context for debugging

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: `SCREAMING_SNAKE_CASE` for easy parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Validation Errors (exit code 1) ===
    /// One or more documents failed schema validation
    ValidationFailed,

    // === Format Errors (exit code 2) ===
    /// Document shape not recognized
    UnrecognizedFormat,

    // === I/O Errors (exit code 3) ===
    /// Input file not found
    FileNotFound,
    /// Input document could not be parsed
    ParseError,
    /// File I/O error
    IoError,

    // === Config Errors (exit code 4) ===
    /// Configuration error
    ConfigError,

    // === Render Errors (exit code 5) ===
    /// Charting backend missing from this build
    BackendUnavailable,
    /// Chart rendering failed
    RenderError,

    // === Internal Errors (exit code 9) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::UnrecognizedFormat => "UNRECOGNIZED_FORMAT",
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::ParseError => "PARSE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::BackendUnavailable => "BACKEND_UNAVAILABLE",
            Self::RenderError => "RENDER_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Get the exit code for this error category.
    ///
    /// Exit codes are grouped by error category:
    /// - 1: Validation failures
    /// - 2: Unrecognized document format
    /// - 3: I/O and parse errors
    /// - 4: Config errors
    /// - 5: Chart rendering errors
    /// - 9: Internal errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationFailed => 1,
            Self::UnrecognizedFormat => 2,
            Self::FileNotFound | Self::ParseError | Self::IoError => 3,
            Self::ConfigError => 4,
            Self::BackendUnavailable | Self::RenderError => 5,
            Self::InternalError => 9,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `ReportError`.
    #[must_use]
    pub fn from_error(err: &ReportError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);

        Self {
            code,
            message: err.to_string(),
            hint: err.suggestion().map(str::to_string),
            context,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    ///
    /// Lines carry the `[ERROR]` severity tag used by every diagnostic channel.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31m[ERROR]\x1b[0m ");
        } else {
            output.push_str("[ERROR] ");
        }
        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33m[HINT]\x1b[0m ");
            } else {
                output.push_str("[HINT] ");
            }
            output.push_str(hint);
        }

        output
    }

    /// Extract error code and context from a `ReportError`.
    fn extract_code_and_context(err: &ReportError) -> (ErrorCode, Option<Value>) {
        match err {
            ReportError::FileNotFound { path } => (
                ErrorCode::FileNotFound,
                Some(json!({"path": path.display().to_string()})),
            ),
            ReportError::JsonParse { path, .. } | ReportError::CsvParse { path, .. } => (
                ErrorCode::ParseError,
                Some(json!({"path": path.display().to_string()})),
            ),
            ReportError::Io(_) => (ErrorCode::IoError, None),
            ReportError::UnrecognizedFormat { fields } => (
                ErrorCode::UnrecognizedFormat,
                Some(json!({"fields_seen": fields})),
            ),
            ReportError::ValidationFailed { failed, total } => (
                ErrorCode::ValidationFailed,
                Some(json!({"failed": failed, "total": total})),
            ),
            ReportError::Config(_) | ReportError::Yaml(_) => (ErrorCode::ConfigError, None),
            ReportError::ChartBackendUnavailable => (ErrorCode::BackendUnavailable, None),
            ReportError::Render { path, .. } => (
                ErrorCode::RenderError,
                Some(json!({"path": path.display().to_string()})),
            ),
            // Input JSON is decoded through `JsonParse`; this is report serialization.
            ReportError::Json(_) => (ErrorCode::InternalError, None),
        }
    }
}
