//! Core data types for `benchview`.
//!
//! This module defines the documents the benchmarking harness produces:
//! - `BenchmarkDocument` - single-size timings and memory per structure
//! - `SeriesDocument` - timings per structure across input sizes
//! - `CrossoverDocument` - sizes at which one structure overtakes another
//!
//! Every numeric cell is read leniently into a [`Measure`], so a malformed
//! value degrades to a placeholder instead of failing the whole document.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Benchmarked operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Insert,
    Search,
    Remove,
}

impl Operation {
    pub const ALL: [Self; 3] = [Self::Insert, Self::Search, Self::Remove];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Search => "search",
            Self::Remove => "remove",
        }
    }

    /// Column header used by the table renderer.
    #[must_use]
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Insert => "Insert(ms)",
            Self::Search => "Search(ms)",
            Self::Remove => "Remove(ms)",
        }
    }

    /// Operations selected by an optional filter (all when unset).
    #[must_use]
    pub fn selected(filter: Option<Self>) -> Vec<Self> {
        filter.map_or_else(|| Self::ALL.to_vec(), |op| vec![op])
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = crate::error::ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insert" => Ok(Self::Insert),
            "search" => Ok(Self::Search),
            "remove" => Ok(Self::Remove),
            other => Err(crate::error::ReportError::Config(format!(
                "unknown operation '{other}' (expected insert, search, or remove)"
            ))),
        }
    }
}

/// A numeric cell that is either a usable value or explicitly unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Measure {
    Value(f64),
    #[default]
    Unavailable,
}

impl Measure {
    /// Read a JSON value: numbers and numeric strings parse, anything else
    /// (missing, null, text, non-finite) is unavailable.
    #[must_use]
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Unavailable, Self::finite),
            Some(Value::String(s)) => Self::parse(s),
            _ => Self::Unavailable,
        }
    }

    /// Parse a text cell.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        text.trim().parse::<f64>().map_or(Self::Unavailable, Self::finite)
    }

    fn finite(v: f64) -> Self {
        if v.is_finite() {
            Self::Value(v)
        } else {
            Self::Unavailable
        }
    }

    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unavailable => None,
        }
    }

    /// Render with a fixed number of decimals, or `-` when unavailable.
    #[must_use]
    pub fn format(&self, digits: usize) -> String {
        match self {
            Self::Value(v) => format!("{v:.digits$}"),
            Self::Unavailable => "-".to_string(),
        }
    }
}

impl From<Option<f64>> for Measure {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unavailable, Self::finite)
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::Unavailable => serializer.serialize_none(),
        }
    }
}

/// Memory footprint cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryCell {
    Bytes(u64),
    /// Absent or null; renders as `0` like the harness default.
    #[default]
    Missing,
    Malformed,
}

impl MemoryCell {
    #[must_use]
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            other => match Measure::from_json(other) {
                Measure::Value(v) if v >= 0.0 => Self::Bytes(v.trunc() as u64),
                _ => Self::Malformed,
            },
        }
    }

    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::Missing;
        }
        match Measure::parse(text) {
            Measure::Value(v) if v >= 0.0 => Self::Bytes(v.trunc() as u64),
            _ => Self::Malformed,
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Bytes(b) => b.to_string(),
            Self::Missing => "0".to_string(),
            Self::Malformed => "-".to_string(),
        }
    }
}

impl Serialize for MemoryCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bytes(b) => serializer.serialize_u64(*b),
            Self::Missing => serializer.serialize_u64(0),
            Self::Malformed => serializer.serialize_none(),
        }
    }
}

/// Run metadata attached to a benchmark document.
///
/// Scalars such as `seed` are kept as raw JSON so they display exactly as the
/// harness wrote them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    pub schema_version: Option<i64>,
    pub seed: Option<Value>,
    pub size: Option<Value>,
    pub runs: Option<Value>,
    pub cpu_model: Option<String>,
    pub cores: Option<Value>,
    pub total_ram_bytes: Option<Value>,
    pub kernel: Option<String>,
    pub compiler: Option<String>,
    pub build_type: Option<String>,
    pub cpu_governor: Option<String>,
}

impl Meta {
    #[must_use]
    pub fn from_json(value: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };
        let scalar = |key: &str| map.get(key).filter(|v| !v.is_null()).cloned();
        let text = |key: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            schema_version: map.get("schema_version").and_then(Value::as_i64),
            seed: scalar("seed"),
            size: scalar("size"),
            runs: scalar("runs"),
            cpu_model: text("cpu_model"),
            cores: scalar("cores"),
            total_ram_bytes: scalar("total_ram_bytes"),
            kernel: text("kernel"),
            compiler: text("compiler"),
            build_type: text("build_type"),
            cpu_governor: text("cpu_governor"),
        }
    }

    /// Short hardware description for chart annotations, if any field is known.
    #[must_use]
    pub fn hardware_summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(cpu) = &self.cpu_model {
            parts.push(format!("cpu: {cpu}"));
        }
        if let Some(cores) = &self.cores {
            parts.push(format!("cores: {}", display_scalar(cores)));
        }
        if let Some(ram) = self.total_ram_bytes.as_ref().and_then(Value::as_u64) {
            parts.push(format!("ram: {:.1} GiB", ram as f64 / 1_073_741_824.0));
        }
        if let Some(kernel) = &self.kernel {
            parts.push(format!("kernel: {kernel}"));
        }
        if let Some(compiler) = &self.compiler {
            parts.push(format!("compiler: {compiler}"));
        }
        if let Some(build) = &self.build_type {
            parts.push(format!("build: {build}"));
        }
        if let Some(governor) = &self.cpu_governor {
            parts.push(format!("governor: {governor}"));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// Display a JSON scalar without quotes around strings.
#[must_use]
pub fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One structure's timings from a single-size benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRow {
    pub structure: String,
    pub insert_ms: Measure,
    pub search_ms: Measure,
    pub remove_ms: Measure,
    pub memory_bytes: MemoryCell,
}

impl BenchmarkRow {
    #[must_use]
    pub fn from_json(entry: &Value) -> Self {
        let get = |key: &str| entry.get(key);
        Self {
            structure: structure_name(get("structure")),
            insert_ms: Measure::from_json(get("insert_ms_mean")),
            search_ms: Measure::from_json(get("search_ms_mean")),
            remove_ms: Measure::from_json(get("remove_ms_mean")),
            memory_bytes: MemoryCell::from_json(get("memory_bytes")),
        }
    }

    #[must_use]
    pub const fn duration(&self, op: Operation) -> Measure {
        match op {
            Operation::Insert => self.insert_ms,
            Operation::Search => self.search_ms,
            Operation::Remove => self.remove_ms,
        }
    }
}

/// Single-size benchmark results plus run metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkDocument {
    pub meta: Meta,
    pub results: Vec<BenchmarkRow>,
}

impl BenchmarkDocument {
    #[must_use]
    pub fn from_json(blob: &Value) -> Self {
        Self {
            meta: Meta::from_json(blob.get("meta")),
            results: list(blob, "results").iter().map(BenchmarkRow::from_json).collect(),
        }
    }
}

/// One structure's timings at one input size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub structure: String,
    pub size: Option<u64>,
    pub insert_ms: Measure,
    pub search_ms: Measure,
    pub remove_ms: Measure,
}

impl SeriesPoint {
    #[must_use]
    pub fn from_json(entry: &Value) -> Self {
        let get = |key: &str| entry.get(key);
        Self {
            structure: structure_name(get("structure")),
            size: parse_count(get("size")),
            insert_ms: Measure::from_json(get("insert_ms")),
            search_ms: Measure::from_json(get("search_ms")),
            remove_ms: Measure::from_json(get("remove_ms")),
        }
    }

    #[must_use]
    pub const fn duration(&self, op: Operation) -> Measure {
        match op {
            Operation::Insert => self.insert_ms,
            Operation::Search => self.search_ms,
            Operation::Remove => self.remove_ms,
        }
    }
}

/// Timings per structure across multiple input sizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesDocument {
    pub points: Vec<SeriesPoint>,
}

impl SeriesDocument {
    #[must_use]
    pub fn from_json(blob: &Value) -> Self {
        Self {
            points: list(blob, "series").iter().map(SeriesPoint::from_json).collect(),
        }
    }
}

/// Which top-level field carried the crossover list.
///
/// The rendering path of the harness writes `crossover`, the JSON writer
/// `crossovers`; both are accepted and the one seen is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverField {
    #[default]
    Crossover,
    Crossovers,
}

impl CrossoverField {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Crossover => "crossover",
            Self::Crossovers => "crossovers",
        }
    }
}

/// A recorded crossover between two structures for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossoverRow {
    pub operation: String,
    pub a: String,
    pub b: String,
    pub size_at_crossover: Option<u64>,
}

impl CrossoverRow {
    #[must_use]
    pub fn from_json(entry: &Value) -> Self {
        let text = |key: &str| {
            entry
                .get(key)
                .map_or_else(|| "?".to_string(), display_scalar)
        };
        Self {
            operation: text("operation"),
            a: text("a"),
            b: text("b"),
            size_at_crossover: parse_count(entry.get("size_at_crossover")),
        }
    }
}

/// Crossover points for any number of operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossoverDocument {
    pub field: CrossoverField,
    pub rows: Vec<CrossoverRow>,
}

impl CrossoverDocument {
    #[must_use]
    pub fn from_json(blob: &Value, field: CrossoverField) -> Self {
        Self {
            field,
            rows: list(blob, field.as_str())
                .iter()
                .map(CrossoverRow::from_json)
                .collect(),
        }
    }
}

/// A classified, typed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Document {
    Benchmark(BenchmarkDocument),
    Series(SeriesDocument),
    Crossover(CrossoverDocument),
}

fn list<'a>(blob: &'a Value, key: &str) -> &'a [Value] {
    blob.get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

fn structure_name(value: Option<&Value>) -> String {
    value.map_or_else(|| "?".to_string(), display_scalar)
}

/// Parse an element count; fractional values truncate like the harness tools
/// (`int(float(x))`), negatives and text are rejected.
#[must_use]
pub fn parse_count(value: Option<&Value>) -> Option<u64> {
    match Measure::from_json(value) {
        Measure::Value(v) if v >= 0.0 => Some(v.trunc() as u64),
        _ => None,
    }
}

/// Text-cell variant of [`parse_count`].
#[must_use]
pub fn parse_count_text(text: &str) -> Option<u64> {
    match Measure::parse(text) {
        Measure::Value(v) if v >= 0.0 => Some(v.trunc() as u64),
        _ => None,
    }
}

/// Build a JSON object from CSV-style string cells.
#[must_use]
pub fn object_from_cells<'a, I>(cells: I) -> Value
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let map: Map<String, Value> = cells
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    Value::Object(map)
}
