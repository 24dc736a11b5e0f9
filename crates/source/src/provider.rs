use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::{Records, SourceError};

/// A pluggable provider of candidate records.
///
/// Implementations own the acquisition strategy (static list, generator,
/// remote fetch). The pipeline only ever sees the resolved [`Records`].
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load(&self) -> Result<Records, SourceError>;
}

#[async_trait]
impl RecordSource for Vec<Value> {
    async fn load(&self) -> Result<Records, SourceError> {
        Ok(Records::from(self.clone()))
    }
}

/// Adapts a closure returning a future into a [`RecordSource`].
pub struct FnSource<F>(F);

impl<F, Fut> FnSource<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Value>, SourceError>> + Send,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> RecordSource for FnSource<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Value>, SourceError>> + Send,
{
    async fn load(&self) -> Result<Records, SourceError> {
        (self.0)().await.map(Records::from)
    }
}

/// Parse a JSON document into a record collection.
///
/// The document must be a top-level array; anything else is rejected with
/// [`SourceError::InvalidShape`].
pub fn from_json(document: &str) -> Result<Records, SourceError> {
    match serde_json::from_str::<Value>(document)? {
        Value::Array(items) => Ok(Records::from(items)),
        other => Err(SourceError::InvalidShape(format!(
            "expected a JSON array, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
