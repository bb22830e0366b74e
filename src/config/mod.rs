//! Configuration management for `benchview`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`BENCHVIEW_*`)
//! 3. Project config (`./.benchview.yaml`)
//! 4. User config (`~/.config/benchview/config.yaml`)
//! 5. Defaults
//!
//! YAML files are flattened to dotted keys; list values join with newlines so
//! free-text items such as `notes` keep their commas.

use crate::error::{ReportError, Result};
use crate::guard::DEFAULT_SCHEMA_VERSION;
use crate::scale::ScaleMode;
use crate::validate::DEFAULT_SCHEMA_DIR;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_CONFIG_FILENAME: &str = ".benchview.yaml";
const ENV_PREFIX: &str = "BENCHVIEW_";
const DEFAULT_OUT_DIR: &str = "build/plots";
const LIST_SEPARATOR: char = '\n';

/// A flat key/value configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file exists but cannot be read, and `Yaml` if it
    /// cannot be parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|err| {
            ReportError::Config(format!("cannot read '{}': {err}", path.display()))
        })?;
        let value: serde_yaml::Value = serde_yaml::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(layer_from_yaml_value(&value))
    }

    /// Build a layer from `BENCHVIEW_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from explicit `(name, value)` pairs, keeping only
    /// `BENCHVIEW_*` names.
    #[must_use]
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layer.insert(stripped, value);
            }
        }
        layer
    }

    fn insert(&mut self, key: &str, value: String) {
        self.values.insert(normalize_key(key), value);
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// CLI overrides for config loading.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub out_dir: Option<PathBuf>,
    pub scale: Option<ScaleMode>,
    pub schema_dir: Option<PathBuf>,
    pub expected_schema_version: Option<i64>,
    pub no_hw_info: Option<bool>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(path) = &self.out_dir {
            layer.insert("out-dir", path.to_string_lossy().to_string());
        }
        if let Some(scale) = self.scale {
            layer.insert("scale", scale.as_str().to_string());
        }
        if let Some(path) = &self.schema_dir {
            layer.insert("schema-dir", path.to_string_lossy().to_string());
        }
        if let Some(version) = self.expected_schema_version {
            layer.insert("expected-schema-version", version.to_string());
        }
        if let Some(no_hw_info) = self.no_hw_info {
            layer.insert("no-hw-info", no_hw_info.to_string());
        }

        layer
    }
}

/// Resolved settings used by the commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub out_dir: PathBuf,
    pub scale: ScaleMode,
    pub schema_dir: PathBuf,
    pub expected_schema_version: i64,
    pub no_hw_info: bool,
    pub notes: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            scale: ScaleMode::Auto,
            schema_dir: PathBuf::from(DEFAULT_SCHEMA_DIR),
            expected_schema_version: DEFAULT_SCHEMA_VERSION,
            no_hw_info: false,
            notes: Vec::new(),
        }
    }
}

impl ReportConfig {
    /// Resolve typed settings from a merged layer.
    ///
    /// # Errors
    ///
    /// Returns `Config` if a recognized key holds an unusable value.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let defaults = Self::default();

        let scale = layer
            .get("scale")
            .map(str::parse::<ScaleMode>)
            .transpose()?
            .unwrap_or(defaults.scale);

        let expected_schema_version = layer
            .get("expected-schema-version")
            .map(|raw| {
                raw.parse::<i64>().map_err(|_| {
                    ReportError::Config(format!(
                        "expected-schema-version must be an integer, got '{raw}'"
                    ))
                })
            })
            .transpose()?
            .unwrap_or(defaults.expected_schema_version);

        let no_hw_info = layer
            .get("no-hw-info")
            .map(|raw| {
                parse_bool(raw).ok_or_else(|| {
                    ReportError::Config(format!("no-hw-info must be a boolean, got '{raw}'"))
                })
            })
            .transpose()?
            .unwrap_or(defaults.no_hw_info);

        let notes = layer
            .get("notes")
            .map(|raw| {
                raw.split(LIST_SEPARATOR)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            out_dir: layer.get("out-dir").map_or(defaults.out_dir, PathBuf::from),
            scale,
            schema_dir: layer
                .get("schema-dir")
                .map_or(defaults.schema_dir, PathBuf::from),
            expected_schema_version,
            no_hw_info,
            notes,
        })
    }
}

/// Load project config (`<dir>/.benchview.yaml`).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(dir: &Path) -> Result<ConfigLayer> {
    ConfigLayer::from_yaml(&dir.join(PROJECT_CONFIG_FILENAME))
}

/// Load user config (`~/.config/benchview/config.yaml`).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigLayer> {
    let Ok(home) = env::var("HOME") else {
        return Ok(ConfigLayer::default());
    };
    let path = Path::new(&home)
        .join(".config")
        .join("benchview")
        .join("config.yaml");
    ConfigLayer::from_yaml(&path)
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let defaults = ReportConfig::default();
    let mut layer = ConfigLayer::default();
    layer.insert("out-dir", defaults.out_dir.to_string_lossy().to_string());
    layer.insert("scale", defaults.scale.as_str().to_string());
    layer.insert(
        "schema-dir",
        defaults.schema_dir.to_string_lossy().to_string(),
    );
    layer.insert(
        "expected-schema-version",
        defaults.expected_schema_version.to_string(),
    );
    layer
}

/// Load and resolve configuration with the full precedence order.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or parsed, or a value is
/// unusable.
pub fn load_config(project_dir: &Path, cli: &CliOverrides) -> Result<ReportConfig> {
    let merged = ConfigLayer::merge_layers(&[
        default_config_layer(),
        load_user_config()?,
        load_project_config(project_dir)?,
        ConfigLayer::from_env(),
        cli.as_layer(),
    ]);
    ReportConfig::from_layer(&merged)
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn layer_from_yaml_value(value: &serde_yaml::Value) -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    let mut flat = HashMap::new();
    flatten_yaml(value, "", &mut flat);

    for (key, value) in flat {
        layer.insert(&key, value);
    }

    layer
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        serde_yaml::Value::Sequence(values) => {
            let joined = values
                .iter()
                .filter_map(yaml_scalar_to_string)
                .collect::<Vec<_>>()
                .join(&LIST_SEPARATOR.to_string());
            out.insert(prefix.to_string(), joined);
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}
