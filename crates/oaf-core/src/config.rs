use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.oaf.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OafConfig {
    /// Name of the generated flow document.
    pub name: String,
    pub description: Option<String>,
    pub generator: GeneratorOptions,
    pub synthesizer: SynthesizerOptions,
}

impl Default for OafConfig {
    fn default() -> Self {
        Self {
            name: "Generated API test flow".to_string(),
            description: None,
            generator: GeneratorOptions::default(),
            synthesizer: SynthesizerOptions::default(),
        }
    }
}

/// Which case families the suite generator produces, and for which endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub include_success_cases: bool,
    /// Master toggle for every family in `error_cases`.
    pub include_error_cases: bool,
    pub error_cases: ErrorCaseConfig,
    pub include_edge_cases: bool,
    /// Allow-list entries: an operationId, `"METHOD /path"` or `"/path"`.
    /// Empty means every endpoint.
    pub endpoints: Vec<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            include_success_cases: true,
            include_error_cases: true,
            error_cases: ErrorCaseConfig::default(),
            include_edge_cases: true,
            endpoints: Vec::new(),
        }
    }
}

/// Independently toggleable negative-case families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorCaseConfig {
    pub include_missing_fields: bool,
    pub include_invalid_formats: bool,
    pub include_auth_errors: bool,
}

impl Default for ErrorCaseConfig {
    fn default() -> Self {
        Self {
            include_missing_fields: true,
            include_invalid_formats: true,
            include_auth_errors: true,
        }
    }
}

impl ErrorCaseConfig {
    pub fn any_enabled(&self) -> bool {
        self.include_missing_fields || self.include_invalid_formats || self.include_auth_errors
    }
}

/// Locale used for human-facing synthesized values and step names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-TW", alias = "zh-tw", alias = "zh_TW")]
    ZhTw,
    #[serde(rename = "en", alias = "en-US", alias = "en-us")]
    En,
}

/// Data synthesizer behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerOptions {
    /// Prefer caller-supplied and schema-level examples.
    pub use_examples: bool,
    /// Prefer schema `default` values.
    pub use_defaults: bool,
    /// Pick the first `enum` entry for enumerated fields.
    pub use_enums: bool,
    pub locale: Locale,
    /// Fixed seed for reproducible output; fresh entropy per call when unset.
    pub seed: Option<u64>,
}

impl Default for SynthesizerOptions {
    fn default() -> Self {
        Self {
            use_examples: true,
            use_defaults: true,
            use_enums: true,
            locale: Locale::default(),
            seed: None,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oaf.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OafConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: OafConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!("loaded config from {}", path.display());
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oaf configuration
name: Generated API test flow

generator:
  include_success_cases: true
  include_edge_cases: true
  include_error_cases: true
  error_cases:
    include_missing_fields: true
    include_invalid_formats: true
    include_auth_errors: true
  endpoints: []         # operationId | "METHOD /path" | "/path"

synthesizer:
  use_examples: true
  use_defaults: true
  use_enums: true
  locale: zh-TW         # zh-TW | en
  # seed: 42            # fix for reproducible payloads
"#
}
