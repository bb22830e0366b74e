//! Schema validation of harness JSON documents.
//!
//! Each file is loaded, classified (a `results` list alone is enough to route
//! to the benchmark schema), paired with its schema file and checked by a
//! [`SchemaValidator`]. A batch passes only if every file passes; a failing
//! file never stops the rest of the batch.

mod schema;

pub use schema::{DEFAULT_SCHEMA_DIR, JsonSchemaValidator, schema_file};

use crate::classify::{DocumentKind, classify_for_validation};
use crate::model::CrossoverField;
use crate::reader::load_json;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Structural check of an instance against a schema document.
pub trait SchemaValidator {
    /// # Errors
    ///
    /// Returns a description of every violation, or of the schema itself
    /// being unusable.
    fn check(&self, schema: &Value, instance: &Value) -> Result<(), String>;
}

/// Result for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Ok {
        schema: &'static str,
        /// Crossover list field seen, for crossover documents.
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<CrossoverField>,
    },
    Fail {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileVerdict {
    pub path: PathBuf,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl FileVerdict {
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.verdict, Verdict::Ok { .. })
    }

    /// `[OK] <file name> -> <schema>` or `[FAIL] <path>: <reason>`.
    #[must_use]
    pub fn line(&self) -> String {
        match &self.verdict {
            Verdict::Ok { schema, field } => {
                let name = self
                    .path
                    .file_name()
                    .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned());
                match field {
                    Some(field) => format!("[OK] {name} -> {schema} (field '{}')", field.as_str()),
                    None => format!("[OK] {name} -> {schema}"),
                }
            }
            Verdict::Fail { reason } => format!("[FAIL] {}: {reason}", self.path.display()),
        }
    }
}

/// Verdicts for a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileVerdict>,
}

impl BatchReport {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.files.iter().all(FileVerdict::passed)
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| !f.passed()).count()
    }
}

/// Routes documents to schema files and delegates checking.
pub struct ValidationDispatcher<'a, V: SchemaValidator> {
    validator: &'a V,
    schema_dir: PathBuf,
}

impl<'a, V: SchemaValidator> ValidationDispatcher<'a, V> {
    pub fn new(validator: &'a V, schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            validator,
            schema_dir: schema_dir.into(),
        }
    }

    fn try_file(&self, path: &Path) -> Result<Verdict, String> {
        let instance = load_json(path).map_err(|e| e.to_string())?;
        let kind = classify_for_validation(&instance).map_err(|e| e.to_string())?;
        let schema_name = schema_file(kind);
        let schema_path = self.schema_dir.join(schema_name);
        debug!(path = %path.display(), schema = %schema_path.display(), "Validating");

        let schema = load_json(&schema_path).map_err(|e| format!("schema {schema_name}: {e}"))?;
        self.validator.check(&schema, &instance)?;

        let field = match kind {
            DocumentKind::Crossover(field) => Some(field),
            DocumentKind::Benchmark | DocumentKind::Series => None,
        };
        Ok(Verdict::Ok {
            schema: schema_name,
            field,
        })
    }

    /// Validate one file; every failure is folded into the verdict.
    #[must_use]
    pub fn validate_file(&self, path: &Path) -> FileVerdict {
        let verdict = self
            .try_file(path)
            .unwrap_or_else(|reason| Verdict::Fail { reason });
        FileVerdict {
            path: path.to_path_buf(),
            verdict,
        }
    }

    /// Validate files in order, calling `on_verdict` as each completes.
    pub fn validate_batch<P, F>(&self, paths: &[P], mut on_verdict: F) -> BatchReport
    where
        P: AsRef<Path>,
        F: FnMut(&FileVerdict),
    {
        let files = paths
            .iter()
            .map(|p| {
                let verdict = self.validate_file(p.as_ref());
                on_verdict(&verdict);
                verdict
            })
            .collect();
        BatchReport { files }
    }
}
