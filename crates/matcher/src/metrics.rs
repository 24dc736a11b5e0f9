// Metrics hooks for the `matcher` crate.
//
// Callers install a global `MatchMetrics` implementation via [`set_match_metrics`];
// every call to [`find_matches`](crate::find_matches) then reports the engine
// name, scan latency, probe count and hit count. Nothing is recorded while no
// recorder is installed.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for matching passes.
pub trait MatchMetrics: Send + Sync {
    /// Record the outcome of one full scan.
    ///
    /// `engine` is [`SearchEngine::name`](crate::SearchEngine::name), `probes`
    /// counts the engine invocations and `hit_count` the entries produced
    /// before ranking.
    fn record_match(&self, engine: &str, latency: Duration, probes: usize, hit_count: usize);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
