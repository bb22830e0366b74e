//! Schema version guard for benchmark documents.
//!
//! A mismatch is advisory: the caller warns and keeps rendering.

use crate::model::Meta;

/// Schema version written by the current harness.
pub const DEFAULT_SCHEMA_VERSION: i64 = 1;

/// Outcome of a version check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    Matches,
    Mismatch { found: Option<i64>, expected: i64 },
}

impl VersionCheck {
    /// Warning text for a mismatch, `None` when versions agree.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Matches => None,
            Self::Mismatch { found, expected } => {
                let found = found.map_or_else(|| "missing".to_string(), |v| v.to_string());
                Some(format!(
                    "schema_version={found} (expected {expected}); attempting best-effort parse"
                ))
            }
        }
    }
}

/// Compares `meta.schema_version` against an explicitly configured version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaGuard {
    expected: i64,
}

impl Default for SchemaGuard {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA_VERSION)
    }
}

impl SchemaGuard {
    #[must_use]
    pub const fn new(expected: i64) -> Self {
        Self { expected }
    }

    #[must_use]
    pub fn check(&self, meta: &Meta) -> VersionCheck {
        match meta.schema_version {
            Some(found) if found == self.expected => VersionCheck::Matches,
            found => VersionCheck::Mismatch {
                found,
                expected: self.expected,
            },
        }
    }
}
