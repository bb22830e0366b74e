//! Format classification for harness documents.
//!
//! A JSON document is recognized by a single discriminating top-level field,
//! checked in order (first match wins):
//!
//! 1. list-valued `results` plus a `meta` field: benchmark
//! 2. list-valued `series`: series
//! 3. list-valued `crossover` or `crossovers`: crossover
//!
//! CSV tables are recognized by their column set instead.

use crate::error::{ReportError, Result};
use crate::model::{
    BenchmarkDocument, CrossoverDocument, CrossoverField, Document, SeriesDocument,
    object_from_cells,
};
use crate::reader::CsvTable;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// The shape of a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Benchmark,
    Series,
    Crossover(CrossoverField),
}

impl DocumentKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Benchmark => "benchmark",
            Self::Series => "series",
            Self::Crossover(_) => "crossover",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_list(blob: &Value, key: &str) -> bool {
    blob.get(key).is_some_and(Value::is_array)
}

fn top_level_fields(blob: &Value) -> Vec<String> {
    let mut fields: Vec<String> = blob
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    fields.sort();
    fields
}

fn classify_with(blob: &Value, require_meta: bool) -> Result<DocumentKind> {
    let kind = if is_list(blob, "results") && (!require_meta || blob.get("meta").is_some()) {
        Some(DocumentKind::Benchmark)
    } else if is_list(blob, "series") {
        Some(DocumentKind::Series)
    } else if is_list(blob, "crossover") {
        Some(DocumentKind::Crossover(CrossoverField::Crossover))
    } else if is_list(blob, "crossovers") {
        Some(DocumentKind::Crossover(CrossoverField::Crossovers))
    } else {
        None
    };

    kind.ok_or_else(|| ReportError::UnrecognizedFormat {
        fields: top_level_fields(blob),
    })
}

/// Classify a JSON document for presentation.
///
/// # Errors
///
/// Returns `UnrecognizedFormat` listing the top-level fields seen when no
/// discriminator matches.
pub fn classify(blob: &Value) -> Result<DocumentKind> {
    let kind = classify_with(blob, true)?;
    debug!(kind = %kind, "Classified document");
    Ok(kind)
}

/// Classify a JSON document for schema validation.
///
/// A `results` list alone routes to the benchmark schema, so a document that
/// lost its `meta` block fails validation structurally instead of being
/// reported as unrecognized.
///
/// # Errors
///
/// Returns `UnrecognizedFormat` when no discriminator matches.
pub fn classify_for_validation(blob: &Value) -> Result<DocumentKind> {
    classify_with(blob, false)
}

/// Classify a CSV table by its header columns.
///
/// # Errors
///
/// Returns `UnrecognizedFormat` listing the header names when no known column
/// set is present.
pub fn classify_columns(headers: &[String]) -> Result<DocumentKind> {
    let has = |name: &str| headers.iter().any(|h| h == name);
    if has("insert_ms_mean") {
        Ok(DocumentKind::Benchmark)
    } else if has("size") && has("insert_ms") {
        Ok(DocumentKind::Series)
    } else if has("size_at_crossover") {
        Ok(DocumentKind::Crossover(CrossoverField::Crossover))
    } else {
        Err(ReportError::UnrecognizedFormat {
            fields: headers.to_vec(),
        })
    }
}

/// Classify a JSON document and build its typed form.
///
/// # Errors
///
/// Returns `UnrecognizedFormat` when no discriminator matches.
pub fn parse_document(blob: &Value) -> Result<Document> {
    Ok(match classify(blob)? {
        DocumentKind::Benchmark => Document::Benchmark(BenchmarkDocument::from_json(blob)),
        DocumentKind::Series => Document::Series(SeriesDocument::from_json(blob)),
        DocumentKind::Crossover(field) => {
            Document::Crossover(CrossoverDocument::from_json(blob, field))
        }
    })
}

/// Build a typed document from a CSV table.
///
/// Returns `Ok(None)` for a missing or header-only table.
///
/// # Errors
///
/// Returns `UnrecognizedFormat` when the columns match no known shape.
pub fn document_from_csv(table: &CsvTable) -> Result<Option<Document>> {
    if table.is_empty() {
        return Ok(None);
    }

    let entries: Vec<Value> = table
        .rows
        .iter()
        .map(|row| object_from_cells(row.iter().map(|(k, v)| (k.as_str(), v.as_str()))))
        .collect();

    let doc = match classify_columns(&table.headers)? {
        DocumentKind::Benchmark => Document::Benchmark(BenchmarkDocument::from_json(
            &serde_json::json!({ "results": entries }),
        )),
        DocumentKind::Series => Document::Series(SeriesDocument::from_json(
            &serde_json::json!({ "series": entries }),
        )),
        DocumentKind::Crossover(field) => Document::Crossover(CrossoverDocument::from_json(
            &serde_json::json!({ "crossover": entries }),
            field,
        )),
    };
    Ok(Some(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn benchmark_requires_results_list_and_meta() {
        let blob = json!({"meta": {"schema_version": 1}, "results": []});
        assert_eq!(classify(&blob).unwrap(), DocumentKind::Benchmark);

        let no_meta = json!({"results": []});
        assert!(classify(&no_meta).is_err());

        let not_list = json!({"meta": {}, "results": {}});
        assert!(classify(&not_list).is_err());
    }

    #[test]
    fn benchmark_wins_over_other_discriminators() {
        let blob = json!({"meta": {}, "results": [], "series": [], "crossover": []});
        assert_eq!(classify(&blob).unwrap(), DocumentKind::Benchmark);

        let blob = json!({"series": [], "crossovers": []});
        assert_eq!(classify(&blob).unwrap(), DocumentKind::Series);
    }

    #[test]
    fn both_crossover_spellings_are_accepted() {
        assert_eq!(
            classify(&json!({"crossover": []})).unwrap(),
            DocumentKind::Crossover(CrossoverField::Crossover)
        );
        assert_eq!(
            classify(&json!({"meta": {}, "crossovers": []})).unwrap(),
            DocumentKind::Crossover(CrossoverField::Crossovers)
        );
    }

    #[test]
    fn unrecognized_reports_sorted_fields() {
        let err = classify(&json!({"zeta": 1, "alpha": []})).unwrap_err();
        match err {
            ReportError::UnrecognizedFormat { fields } => {
                assert_eq!(fields, vec!["alpha".to_string(), "zeta".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = classify(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ReportError::UnrecognizedFormat { fields } if fields.is_empty()));
    }

    #[test]
    fn validation_classifier_relaxes_meta() {
        assert_eq!(
            classify_for_validation(&json!({"results": []})).unwrap(),
            DocumentKind::Benchmark
        );
    }

    #[test]
    fn columns_identify_csv_shapes() {
        let cols = |names: &[&str]| names.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        assert_eq!(
            classify_columns(&cols(&["structure", "seed", "insert_ms_mean"])).unwrap(),
            DocumentKind::Benchmark
        );
        assert_eq!(
            classify_columns(&cols(&["size", "structure", "insert_ms"])).unwrap(),
            DocumentKind::Series
        );
        assert!(matches!(
            classify_columns(&cols(&["operation", "a", "b", "size_at_crossover"])).unwrap(),
            DocumentKind::Crossover(_)
        ));
        assert!(classify_columns(&cols(&["foo"])).is_err());
    }

    #[test]
    fn csv_table_becomes_typed_document() {
        let mut row = HashMap::new();
        row.insert("structure".to_string(), "array".to_string());
        row.insert("insert_ms_mean".to_string(), "1.5".to_string());
        let table = CsvTable {
            headers: vec!["structure".to_string(), "insert_ms_mean".to_string()],
            rows: vec![row],
            present: true,
            ..CsvTable::default()
        };

        let Some(Document::Benchmark(doc)) = document_from_csv(&table).unwrap() else {
            panic!("expected benchmark document");
        };
        assert_eq!(doc.results[0].structure, "array");
        assert_eq!(doc.results[0].insert_ms.value(), Some(1.5));

        assert!(document_from_csv(&CsvTable::default()).unwrap().is_none());
    }
}
