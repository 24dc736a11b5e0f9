//! Workspace umbrella crate for the suggest autocomplete core.
//!
//! This crate stitches the stages together so callers can go from widget
//! text and a record source to a ranked suggestion list with one call:
//!
//! data source → input value → effective query → trigger gate → scan → rank
//!
//! [`Autocomplete::run`] is the synchronous pipeline over records already in
//! hand. [`Autocomplete::start`] resolves a [`DataSource`] first and runs the
//! pipeline in the resolution continuation.

pub mod config;

pub use crate::config::{ConfigLoadError, SuggestConfig};
pub use matcher::{
    Comparator, DefaultSearch, Feedback, FnEngine, MatchConfig, MatchEntry, MatchError,
    MatchMetrics, Matcher, ResultFilter, Scored, SearchEngine, SearchMatch, SearchMode,
    SearchOptions, by_score_desc, find_matches, highlight, rank, search_fn, set_match_metrics,
};
pub use query::{
    InputSource, QueryHook, Trigger, check_trigger_condition, get_input_value, prepare_query,
    prepare_query_value,
};
pub use source::{
    DataSource, FnSource, RecordSource, Records, SourceError, from_json, prepare_data, resolve,
};

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use thiserror::Error;
use tracing::{Level, debug, info, warn};

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data source failure: {0}")]
    Source(#[from] SourceError),
    #[error("matching failure: {0}")]
    Match(#[from] MatchError),
    #[error("pipeline task was cancelled")]
    Cancelled,
}

/// A configured autocomplete pipeline.
///
/// Holds no per-call state; every [`run`](Self::run) builds its result list
/// from scratch.
pub struct Autocomplete<E: SearchEngine = DefaultSearch> {
    config: MatchConfig,
    matcher: Matcher<E>,
    query: Option<QueryHook>,
    trigger: Trigger,
}

impl Autocomplete<DefaultSearch> {
    pub fn new(config: MatchConfig) -> Self {
        Self::with_engine(config, DefaultSearch)
    }
}

impl<E: SearchEngine> Autocomplete<E> {
    pub fn with_engine(config: MatchConfig, engine: E) -> Self {
        Self {
            config,
            matcher: Matcher::with_engine(engine),
            query: None,
            trigger: Trigger::default(),
        }
    }

    pub fn with_query_hook(mut self, hook: QueryHook) -> Self {
        self.query = Some(hook);
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_sort(mut self, sort: Comparator<E::Match>) -> Self {
        self.matcher = self.matcher.with_sort(sort);
        self
    }

    pub fn with_filter(mut self, filter: ResultFilter<E::Match>) -> Self {
        self.matcher = self.matcher.with_filter(filter);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run the pipeline against records already resolved.
    ///
    /// Returns `Ok(None)` when the trigger rejects the effective query; the
    /// matcher is not invoked in that case. Config validation belongs to
    /// [`Matcher::run`], so it only happens for eligible queries.
    pub fn run(
        &self,
        input: &InputSource,
        records: &[Value],
    ) -> Result<Option<Feedback<E::Match>>, PipelineError> {
        let start = Instant::now();
        let query = prepare_query(input, self.query.as_ref());
        let span = tracing::span!(
            Level::INFO,
            "suggest.run",
            query_len = query.chars().count(),
            records = records.len(),
            engine = self.matcher.engine().name()
        );
        let _guard = span.enter();

        if !check_trigger_condition(&self.trigger, &query, self.config.threshold) {
            debug!(
                threshold = self.config.threshold,
                custom_condition = self.trigger.has_condition(),
                "trigger_rejected"
            );
            return Ok(None);
        }

        match self.matcher.run(&query, records, &self.config) {
            Ok(feedback) => {
                info!(
                    matches = feedback.matches.len(),
                    results = feedback.results.len(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "suggest_success"
                );
                Ok(Some(feedback))
            }
            Err(err) => {
                warn!(
                    error = %err,
                    elapsed_micros = start.elapsed().as_micros(),
                    "suggest_failure"
                );
                Err(err.into())
            }
        }
    }
}

impl<E: SearchEngine + 'static> Autocomplete<E> {
    /// Resolve `source`, then run the pipeline on the resolved records.
    ///
    /// Resolution goes through [`prepare_data`], so the pipeline always runs
    /// on a spawned task and must be awaited from within a Tokio runtime. A
    /// panic inside the engine, comparator or filter is resumed on the
    /// awaiting task.
    pub async fn start(
        self: Arc<Self>,
        input: InputSource,
        source: DataSource,
    ) -> Result<Option<Feedback<E::Match>>, PipelineError> {
        let handle = prepare_data(source, move |records| self.run(&input, &records));
        match handle.await {
            Ok(resolved) => resolved?,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Err(PipelineError::Cancelled),
        }
    }
}

impl<E: SearchEngine + fmt::Debug> fmt::Debug for Autocomplete<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autocomplete")
            .field("config", &self.config)
            .field("matcher", &self.matcher)
            .field("query", &self.query)
            .field("trigger", &self.trigger)
            .finish()
    }
}
