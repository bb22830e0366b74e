//! Sample harness outputs and schema documents.

use super::cli::Workspace;

pub const BENCHMARK_JSON: &str = r#"{
  "meta": {
    "schema_version": 1,
    "seed": 42,
    "size": 100000,
    "runs": 5,
    "cpu_model": "Test CPU 3000",
    "cores": 8
  },
  "results": [
    {"structure": "array", "insert_ms_mean": 12.346, "search_ms_mean": 0.5,
     "remove_ms_mean": 3.25, "memory_bytes": 400000},
    {"structure": "hash_map", "insert_ms_mean": 20.0, "search_ms_mean": 0.126,
     "remove_ms_mean": "n/a", "memory_bytes": 1200000}
  ]
}"#;

pub const SERIES_JSON: &str = r#"{
  "series": [
    {"size": 1000, "structure": "array", "insert_ms": 1.0, "search_ms": 0.1, "remove_ms": 0.5},
    {"size": 10000, "structure": "array", "insert_ms": 9.0, "search_ms": 0.4, "remove_ms": 4.0},
    {"size": 1000, "structure": "list", "insert_ms": 2.0, "search_ms": 0.3, "remove_ms": 0.2},
    {"size": 10000, "structure": "list", "insert_ms": 4.0, "search_ms": 3.0, "remove_ms": 0.6}
  ]
}"#;

pub const CROSSOVERS_JSON: &str = r#"{
  "crossovers": [
    {"operation": "search", "a": "array", "b": "hash_map", "size_at_crossover": 4096},
    {"operation": "insert", "a": "list", "b": "array", "size_at_crossover": 512},
    {"operation": "search", "a": "list", "b": "array", "size_at_crossover": 64}
  ]
}"#;

pub const BENCHMARK_CSV: &str = "structure,insert_ms_mean,search_ms_mean,remove_ms_mean,memory_bytes
array,12.346,0.5,3.25,400000
hash_map,20.0,0.126,1.5,1200000
";

pub const SERIES_CSV: &str = "size,structure,insert_ms,search_ms,remove_ms
1000,array,1.0,0.1,0.5
10000,array,9.0,0.4,4.0
1000,list,2.0,0.3,0.2
";

pub const CROSSOVER_CSV: &str = "operation,a,b,size_at_crossover
insert,list,array,512
insert,array,hash_map,128
search,list,array,64
";

const BENCHMARK_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "required": ["meta", "results"],
  "properties": {
    "meta": {"type": "object", "required": ["schema_version"]},
    "results": {"type": "array", "items": {"type": "object", "required": ["structure"]}}
  }
}"#;

const SERIES_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "required": ["series"],
  "properties": {
    "series": {"type": "array", "items": {"type": "object", "required": ["size", "structure"]}}
  }
}"#;

const CROSSOVER_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "properties": {
    "crossovers": {"type": "array", "items": {"type": "object", "required": ["operation"]}},
    "crossover": {"type": "array", "items": {"type": "object", "required": ["operation"]}}
  }
}"#;

/// Install the three schema documents under the default schema directory.
pub fn install_schemas(workspace: &Workspace) {
    install_schemas_at(workspace, "docs/api/schemas");
}

pub fn install_schemas_at(workspace: &Workspace, dir: &str) {
    workspace.write(&format!("{dir}/benchmark_results.schema.json"), BENCHMARK_SCHEMA);
    workspace.write(&format!("{dir}/series_results.schema.json"), SERIES_SCHEMA);
    workspace.write(&format!("{dir}/crossover_results.schema.json"), CROSSOVER_SCHEMA);
}

/// Write the three harness CSVs where `summary` and `plot` look by default.
pub fn install_csvs(workspace: &Workspace) {
    workspace.write("build/benchmark_results.csv", BENCHMARK_CSV);
    workspace.write("build/series_results.csv", SERIES_CSV);
    workspace.write("build/crossover_results.csv", CROSSOVER_CSV);
}
