use std::cmp::Ordering;
use std::sync::Arc;

use crate::types::{MatchEntry, Scored};

/// Caller-supplied ordering over match entries (`Less` sorts `a` first).
pub type Comparator<M> = Arc<dyn Fn(&MatchEntry<M>, &MatchEntry<M>) -> Ordering + Send + Sync>;

/// Caller-supplied post-processing of the full match list, run before ranking.
pub type ResultFilter<M> = Arc<dyn Fn(Vec<MatchEntry<M>>) -> Vec<MatchEntry<M>> + Send + Sync>;

/// Order by descending score. Equal scores keep discovery order.
pub fn by_score_desc<M: Scored + 'static>() -> Comparator<M> {
    Arc::new(|a: &MatchEntry<M>, b: &MatchEntry<M>| b.matched.score().cmp(&a.matched.score()))
}

/// Sort with `sort` when given, then keep the first `max_results` entries.
pub fn rank<M>(
    mut matches: Vec<MatchEntry<M>>,
    sort: Option<&Comparator<M>>,
    max_results: Option<usize>,
) -> Vec<MatchEntry<M>> {
    if let Some(compare) = sort {
        matches.sort_by(|a, b| compare(a, b));
    }
    if let Some(limit) = max_results {
        matches.truncate(limit);
    }
    matches
}
