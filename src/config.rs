//! YAML Configuration File Support for suggest
//!
//! Loads the matcher settings of an autocomplete pipeline from a YAML file,
//! optionally overridden by `SUGGEST_*` environment variables.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "product search"
//!
//! matcher:
//!   keys: ["name", "sku"]
//!   max_results: 8        # null for no limit
//!   threshold: 2
//!   search:
//!     mode: "loose"       # strict | loose | fuzzy
//!     diacritics: true
//! ```
//!
//! ## Environment overrides
//!
//! | Variable               | Field                  |
//! |------------------------|------------------------|
//! | `SUGGEST_MAX_RESULTS`  | `matcher.max_results` (`none` clears the limit) |
//! | `SUGGEST_THRESHOLD`    | `matcher.threshold`    |
//! | `SUGGEST_SEARCH_MODE`  | `matcher.search.mode`  |

use std::fs;
use std::path::Path;

use matcher::{MatchConfig, SearchMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Autocomplete;

const ENV_MAX_RESULTS: &str = "SUGGEST_MAX_RESULTS";
const ENV_THRESHOLD: &str = "SUGGEST_THRESHOLD";
const ENV_SEARCH_MODE: &str = "SUGGEST_SEARCH_MODE";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid environment override {name}={value}")]
    EnvOverride { name: String, value: String },
}

/// Top-level YAML configuration for an autocomplete pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct SuggestConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Matching and ranking settings
    #[serde(default)]
    pub matcher: MatchConfig,
}

impl SuggestConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SuggestConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SUGGEST_*` overrides from the process environment.
    pub fn with_process_env(self) -> Result<Self, ConfigLoadError> {
        self.with_env_overrides(std::env::vars())
    }

    /// Apply `SUGGEST_*` overrides from the given variables. Unrelated
    /// variables are ignored.
    pub fn with_env_overrides<I>(mut self, vars: I) -> Result<Self, ConfigLoadError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let invalid = || ConfigLoadError::EnvOverride {
                name: name.clone(),
                value: value.clone(),
            };
            match name.as_str() {
                ENV_MAX_RESULTS => {
                    self.matcher.max_results = if value.eq_ignore_ascii_case("none") {
                        None
                    } else {
                        Some(value.parse().map_err(|_| invalid())?)
                    };
                }
                ENV_THRESHOLD => {
                    self.matcher.threshold = value.parse().map_err(|_| invalid())?;
                }
                ENV_SEARCH_MODE => {
                    self.matcher.search.mode = match value.to_ascii_lowercase().as_str() {
                        "strict" => SearchMode::Strict,
                        "loose" => SearchMode::Loose,
                        "fuzzy" => SearchMode::Fuzzy,
                        _ => return Err(invalid()),
                    };
                }
                _ => {}
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Build a pipeline over the built-in search engine.
    pub fn build(&self) -> Autocomplete {
        Autocomplete::new(self.matcher.clone())
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.matcher
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))
    }
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            matcher: MatchConfig::default(),
        }
    }
}
