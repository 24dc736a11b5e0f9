use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Matching mode of the built-in search engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring match.
    #[default]
    Strict,
    /// Every query char must appear in order; spaces in the query are ignored.
    Loose,
    /// Skim-style fuzzy scoring.
    Fuzzy,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Strict => "strict",
            SearchMode::Loose => "loose",
            SearchMode::Fuzzy => "fuzzy",
        }
    }
}

/// Options for the built-in search engine. Custom engines may ignore them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SearchOptions {
    #[serde(default)]
    pub mode: SearchMode,
    /// Strip combining diacritical marks before comparing.
    #[serde(default)]
    pub diacritics: bool,
}

/// Configuration for a single matching pass.
///
/// `MatchConfig` is cheap to clone and serde-friendly so it can be embedded
/// in a YAML pipeline config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchConfig {
    /// Field names to probe on each record, in order. `None` probes the
    /// whole record once.
    #[serde(default)]
    pub keys: Option<Vec<String>>,
    /// Maximum number of results to return. `None` means unbounded.
    #[serde(default = "MatchConfig::default_max_results")]
    pub max_results: Option<usize>,
    /// Minimum effective query length for the default trigger rule.
    #[serde(default = "MatchConfig::default_threshold")]
    pub threshold: usize,
    /// Built-in search engine options.
    #[serde(default)]
    pub search: SearchOptions,
}

impl MatchConfig {
    pub(crate) fn default_max_results() -> Option<usize> {
        Some(5)
    }

    pub(crate) fn default_threshold() -> usize {
        1
    }

    /// Probe the listed fields instead of the whole record.
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_search(mut self, mode: SearchMode) -> Self {
        self.search.mode = mode;
        self
    }

    /// Validate the configuration before a matching pass.
    ///
    /// An empty key list is valid and probes nothing. A blank field name is
    /// an ordinary lookup.
    pub fn validate(&self) -> Result<(), MatchError> {
        if let Some(keys) = &self.keys {
            let mut seen = HashSet::with_capacity(keys.len());
            for key in keys {
                if !seen.insert(key.as_str()) {
                    return Err(MatchError::InvalidConfig(format!(
                        "keys contains duplicate field name `{key}`"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            keys: None,
            max_results: Self::default_max_results(),
            threshold: Self::default_threshold(),
            search: SearchOptions::default(),
        }
    }
}

/// One surfaced result.
///
/// `index` is the record's position in the input collection and survives
/// sorting and truncation. `key` is set only for keyed probes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEntry<M> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub index: usize,
    #[serde(rename = "match")]
    pub matched: M,
    pub value: JsonValue,
}

/// Outcome of one matching pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback<M> {
    /// Effective query the pass ran with.
    pub query: String,
    /// Every match found, after the result filter, in discovery order.
    pub matches: Vec<MatchEntry<M>>,
    /// Ranked and truncated list handed to the renderer.
    pub results: Vec<MatchEntry<M>>,
}

/// Payload of the built-in search engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchMatch {
    /// Higher is better. May be zero or negative and is still a match.
    pub score: i64,
    /// Char positions in the probed text that matched the query.
    pub indices: Vec<usize>,
}

/// Match payloads that expose a comparable score.
pub trait Scored {
    fn score(&self) -> i64;
}

impl Scored for SearchMatch {
    fn score(&self) -> i64 {
        self.score
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Invalid configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// The search engine failed while probing a record.
    #[error("search engine failed on record {index}: {message}")]
    Engine { index: usize, message: String },
}
