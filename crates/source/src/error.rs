use thiserror::Error;

/// Errors raised while resolving a record collection.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The deferred provider failed to produce its collection.
    #[error("record source failed: {0}")]
    Failed(String),
    /// The provider produced something other than an ordered collection.
    #[error("record source has invalid shape: {0}")]
    InvalidShape(String),
    /// A JSON document could not be parsed.
    #[error("record source is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
