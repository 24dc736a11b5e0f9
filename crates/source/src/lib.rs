//! Suggest Source Layer
//!
//! Candidate records reach the pipeline through a [`DataSource`]: either a
//! collection that is already in hand, or a deferred computation that will
//! produce one. This crate resolves both shapes the same way and hands the
//! collection on. It never filters, reorders or validates individual records.
//!
//! ## Entry points
//!
//! - [`resolve`] is the plain future form. Await it from any executor.
//! - [`prepare_data`] is the continuation form. It schedules resolution on the
//!   Tokio runtime and invokes the continuation exactly once with the
//!   collection. The continuation never runs inside the caller's turn, even
//!   for [`DataSource::Ready`]. When a deferred source fails the continuation
//!   is skipped and the error is reported through the returned join handle.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use source::{prepare_data, DataSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let source = DataSource::deferred(async { Ok(vec![json!("Apple"), json!("Banana")]) });
//! let handle = prepare_data(source, |records| records.len());
//! assert_eq!(handle.await.unwrap().unwrap(), 2);
//! # }
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

mod error;
mod provider;

pub use crate::error::SourceError;
pub use crate::provider::{FnSource, RecordSource, from_json};

/// A resolved, immutable record collection shared by reference count.
pub type Records = Arc<[Value]>;

type DeferredRecords = Pin<Box<dyn Future<Output = Result<Records, SourceError>> + Send>>;

/// A record collection that is either available now or will be later.
pub enum DataSource {
    Ready(Records),
    Deferred(DeferredRecords),
}

impl DataSource {
    /// Wrap a future producing the collection.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<Vec<Value>, SourceError>> + Send + 'static,
    {
        DataSource::Deferred(Box::pin(async move { future.await.map(Records::from) }))
    }

    /// Defer loading to a [`RecordSource`] provider.
    pub fn from_source<S>(source: S) -> Self
    where
        S: RecordSource + 'static,
    {
        DataSource::Deferred(Box::pin(async move { source.load().await }))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DataSource::Ready(_))
    }
}

impl From<Vec<Value>> for DataSource {
    fn from(records: Vec<Value>) -> Self {
        DataSource::Ready(Records::from(records))
    }
}

impl From<Records> for DataSource {
    fn from(records: Records) -> Self {
        DataSource::Ready(records)
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Ready(records) => f.debug_tuple("Ready").field(&records.len()).finish(),
            DataSource::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Resolve a data source to its record collection.
pub async fn resolve(source: DataSource) -> Result<Records, SourceError> {
    match source {
        DataSource::Ready(records) => Ok(records),
        DataSource::Deferred(future) => future.await,
    }
}

/// Resolve `source` on the Tokio runtime and pass the collection to
/// `continuation`.
///
/// Must be called from within a Tokio runtime. There is no cancellation
/// hook; drop the handle's output if the result is no longer wanted.
pub fn prepare_data<F, T>(source: DataSource, continuation: F) -> JoinHandle<Result<T, SourceError>>
where
    F: FnOnce(Records) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(async move {
        // Ready sources still go through a scheduling point.
        tokio::task::yield_now().await;
        match resolve(source).await {
            Ok(records) => {
                debug!(records = records.len(), "source_resolved");
                Ok(continuation(records))
            }
            Err(err) => {
                warn!(error = %err, "source_failure");
                Err(err)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn resolve_ready_returns_same_collection() {
        let records = resolve(DataSource::from(vec![json!(1), json!(2)]))
            .await
            .expect("ready source resolves");
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn resolve_deferred_awaits_future() {
        let source = DataSource::deferred(async { Ok(vec![json!({"name": "Apple"})]) });
        assert!(!source.is_ready());
        let records = resolve(source).await.expect("deferred source resolves");
        assert_eq!(records[0]["name"], "Apple");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn continuation_is_not_invoked_synchronously() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let handle = prepare_data(DataSource::from(vec![json!("a")]), move |records| {
            seen.fetch_add(1, Ordering::SeqCst);
            records.len()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let len = handle.await.expect("task joins").expect("source resolves");
        assert_eq!(len, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_source_skips_continuation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let source = DataSource::deferred(async { Err(SourceError::Failed("offline".into())) });
        let handle = prepare_data(source, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let err = handle
            .await
            .expect("task joins")
            .expect_err("failure propagates");
        assert!(matches!(err, SourceError::Failed(msg) if msg == "offline"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_sources_are_deferred() {
        let source = DataSource::from_source(vec![json!("x"), json!("y")]);
        assert!(!source.is_ready());
        assert_eq!(format!("{source:?}"), "Deferred(..)");
        let records = resolve(source).await.expect("provider resolves");
        assert_eq!(records.len(), 2);
    }
}
