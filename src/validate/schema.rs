//! Schema catalog and the `jsonschema`-backed validator.

use super::SchemaValidator;
use crate::classify::DocumentKind;
use serde_json::Value;

/// Default directory holding the harness schema documents.
pub const DEFAULT_SCHEMA_DIR: &str = "docs/api/schemas";

/// Schema file name for a document kind.
#[must_use]
pub const fn schema_file(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Benchmark => "benchmark_results.schema.json",
        DocumentKind::Series => "series_results.schema.json",
        DocumentKind::Crossover(_) => "crossover_results.schema.json",
    }
}

/// Validator built on the `jsonschema` crate (draft auto-detected from
/// `$schema`).
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn check(&self, schema: &Value, instance: &Value) -> Result<(), String> {
        let validator =
            jsonschema::validator_for(schema).map_err(|err| format!("invalid schema: {err}"))?;

        let violations: Vec<String> = validator
            .iter_errors(instance)
            .map(|err| {
                let at = err.instance_path.to_string();
                if at.is_empty() {
                    err.to_string()
                } else {
                    format!("{err} (at {at})")
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.join("; "))
        }
    }
}
