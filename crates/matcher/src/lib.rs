//! # Suggest Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` is the matching and ranking core of the suggest pipeline. Given
//! an effective query, a record collection and a [`MatchConfig`], it probes
//! every record (or each configured field of it) with a [`SearchEngine`],
//! collects the hits as [`MatchEntry`] values, and ranks them.
//!
//! ## Core Types
//!
//! - [`MatchConfig`]: field keys, `max_results`, trigger `threshold` and
//!   built-in engine options.
//! - [`SearchEngine`]: the pluggable algorithm. [`DefaultSearch`] ships
//!   strict, loose and fuzzy modes; [`search_fn`] adapts a closure.
//! - [`MatchEntry`]: record index, record value, engine payload and the
//!   probed key when keyed matching is used.
//! - [`Matcher`]: engine plus optional [`Comparator`] and [`ResultFilter`],
//!   producing a [`Feedback`] with every match and the ranked results.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{by_score_desc, MatchConfig, Matcher};
//! use serde_json::json;
//!
//! let records = vec![json!({"name": "Pineapple"}), json!({"name": "Apple"})];
//! let cfg = MatchConfig::default().with_keys(["name"]);
//!
//! let feedback = Matcher::new()
//!     .with_sort(by_score_desc())
//!     .run("apple", &records, &cfg)
//!     .expect("match");
//!
//! assert_eq!(feedback.results[0].index, 1);
//! assert_eq!(feedback.results[0].key.as_deref(), Some("name"));
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to
//! record per-scan latency, probe and hit counts.

pub mod engine;
pub mod metrics;
pub mod rank;
pub mod search;
pub mod types;

pub use crate::engine::{
    DefaultSearch, FnEngine, Matcher, SearchEngine, find_matches, is_absent, search_fn,
};
pub use crate::metrics::{MatchMetrics, set_match_metrics};
pub use crate::rank::{Comparator, ResultFilter, by_score_desc, rank};
pub use crate::search::highlight;
pub use crate::types::{
    Feedback, MatchConfig, MatchEntry, MatchError, Scored, SearchMatch, SearchMode, SearchOptions,
};
