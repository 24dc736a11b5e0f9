//! Suggest Query Layer
//!
//! Turns the widget's current text into the effective query and decides
//! whether that query may trigger matching.
//!
//! 1. [`get_input_value`] reads an [`InputSource`] and lowercases it.
//! 2. [`prepare_query_value`] applies an optional [`QueryHook`] manipulation.
//! 3. [`check_trigger_condition`] gates the rest of the pipeline with a
//!    [`Trigger`] predicate or the length/threshold rule.
//!
//! Everything here is pure: no I/O, no shared state.
//!
//! ```
//! use query::{check_trigger_condition, prepare_query, InputSource, QueryHook, Trigger};
//!
//! let hook = QueryHook::manipulate(|q| q.trim().to_string());
//! let query = prepare_query(&InputSource::TextValue("  Ap ".into()), Some(&hook));
//! assert_eq!(query, "ap");
//! assert!(check_trigger_condition(&Trigger::new(), &query, 2));
//! ```

mod normalize;
mod transform;
mod trigger;

pub use crate::normalize::{InputSource, get_input_value};
pub use crate::transform::{QueryHook, prepare_query_value};
pub use crate::trigger::{Trigger, check_trigger_condition};

/// Normalize and transform in one step.
pub fn prepare_query(input: &InputSource, hook: Option<&QueryHook>) -> String {
    prepare_query_value(get_input_value(input), hook)
}
