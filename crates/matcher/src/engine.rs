use std::fmt;
use std::marker::PhantomData;
use std::time::Instant;

use serde_json::Value;
use tracing::trace;

use crate::metrics::metrics_recorder;
use crate::rank::{Comparator, ResultFilter, rank};
use crate::search::{candidate_text, search};
use crate::types::{Feedback, MatchConfig, MatchEntry, MatchError, SearchMatch};


/// Matching algorithm invoked once per probe target.
///
/// `Ok(None)` means "no match". Any `Some` is a match, whatever the payload
/// looks like, so a zero score is never dropped. An `Err` aborts the scan.
pub trait SearchEngine: Send + Sync {
    type Match: Clone + Send + 'static;

    fn search(
        &self,
        query: &str,
        value: &Value,
        cfg: &MatchConfig,
    ) -> Result<Option<Self::Match>, MatchError>;

    /// Label reported to [`MatchMetrics`](crate::MatchMetrics).
    fn name(&self) -> &str {
        "custom"
    }
}

/// The built-in engine, driven by [`MatchConfig::search`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSearch;

impl SearchEngine for DefaultSearch {
    type Match = SearchMatch;

    fn search(
        &self,
        query: &str,
        value: &Value,
        cfg: &MatchConfig,
    ) -> Result<Option<SearchMatch>, MatchError> {
        Ok(candidate_text(value).and_then(|text| search(query, &text, &cfg.search)))
    }

    fn name(&self) -> &str {
        "default"
    }
}

/// A closure used as a [`SearchEngine`]. Build one with [`search_fn`].
pub struct FnEngine<F, M> {
    f: F,
    _match: PhantomData<fn() -> M>,
}

/// Wrap `(query, value, config) -> Option<M>` as a search engine.
pub fn search_fn<F, M>(f: F) -> FnEngine<F, M>
where
    F: Fn(&str, &Value, &MatchConfig) -> Option<M> + Send + Sync,
    M: Clone + Send + 'static,
{
    FnEngine {
        f,
        _match: PhantomData,
    }
}

impl<F, M> SearchEngine for FnEngine<F, M>
where
    F: Fn(&str, &Value, &MatchConfig) -> Option<M> + Send + Sync,
    M: Clone + Send + 'static,
{
    type Match = M;

    fn search(
        &self,
        query: &str,
        value: &Value,
        cfg: &MatchConfig,
    ) -> Result<Option<M>, MatchError> {
        Ok((self.f)(query, value, cfg))
    }
}

/// Whether a probed value counts as absent.
///
/// Null, `false`, numeric zero and the empty string are absent; every
/// array and object is present, even when empty.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Scan every record and collect one entry per matching probe target.
///
/// Records are visited in collection order; with `cfg.keys` each listed
/// field is probed in key order. There is no early exit: ranking may still
/// promote a late match.
pub fn find_matches<E>(
    engine: &E,
    query: &str,
    records: &[Value],
    cfg: &MatchConfig,
) -> Result<Vec<MatchEntry<E::Match>>, MatchError>
where
    E: SearchEngine + ?Sized,
{
    let start = Instant::now();
    let mut matches = Vec::new();
    let mut probes = 0usize;

    for (index, record) in records.iter().enumerate() {
        match cfg.keys.as_deref() {
            Some(keys) => {
                for key in keys {
                    let Some(value) = record.get(key.as_str()) else {
                        continue;
                    };
                    if is_absent(value) {
                        continue;
                    }
                    probes += 1;
                    if let Some(matched) = engine.search(query, value, cfg)? {
                        matches.push(MatchEntry {
                            key: Some(key.clone()),
                            index,
                            matched,
                            value: record.clone(),
                        });
                    }
                }
            }
            None => {
                if is_absent(record) {
                    continue;
                }
                probes += 1;
                if let Some(matched) = engine.search(query, record, cfg)? {
                    matches.push(MatchEntry {
                        key: None,
                        index,
                        matched,
                        value: record.clone(),
                    });
                }
            }
        }
    }

    let latency = start.elapsed();
    trace!(
        engine = engine.name(),
        probes,
        hits = matches.len(),
        elapsed_micros = latency.as_micros(),
        "scan_complete"
    );
    if let Some(recorder) = metrics_recorder() {
        recorder.record_match(engine.name(), latency, probes, matches.len());
    }

    Ok(matches)
}

/// Matching engine plus ranking policy.
pub struct Matcher<E: SearchEngine> {
    engine: E,
    sort: Option<Comparator<E::Match>>,
    filter: Option<ResultFilter<E::Match>>,
}

impl Matcher<DefaultSearch> {
    /// Matcher over the built-in engine, keeping discovery order.
    pub fn new() -> Self {
        Self::with_engine(DefaultSearch)
    }
}

impl Default for Matcher<DefaultSearch> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SearchEngine> Matcher<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            sort: None,
            filter: None,
        }
    }

    pub fn with_sort(mut self, sort: Comparator<E::Match>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_filter(mut self, filter: ResultFilter<E::Match>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Scan, filter and rank in one pass.
    pub fn run(
        &self,
        query: &str,
        records: &[Value],
        cfg: &MatchConfig,
    ) -> Result<Feedback<E::Match>, MatchError> {
        cfg.validate()?;
        let mut matches = find_matches(&self.engine, query, records, cfg)?;
        if let Some(filter) = &self.filter {
            matches = filter(matches);
        }
        let results = rank(matches.clone(), self.sort.as_ref(), cfg.max_results);
        Ok(Feedback {
            query: query.to_string(),
            matches,
            results,
        })
    }
}

impl<E: SearchEngine + fmt::Debug> fmt::Debug for Matcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("engine", &self.engine)
            .field("sort", &self.sort.is_some())
            .field("filter", &self.filter.is_some())
            .finish()
    }
}
