use std::fmt;
use std::sync::Arc;

type ConditionFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Policy deciding whether a query may run matching at all.
///
/// With a `condition` the predicate decides alone and the threshold is
/// ignored. Without one, the length rule applies.
#[derive(Clone, Default)]
pub struct Trigger {
    condition: Option<ConditionFn>,
}

impl Trigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when<F>(condition: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            condition: Some(Arc::new(condition)),
        }
    }

    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("condition", &self.condition.is_some())
            .finish()
    }
}

/// Decide trigger eligibility for the effective query.
///
/// Default rule: at least `threshold` chars long, and not made of spaces
/// only. Only U+0020 counts as a space here.
pub fn check_trigger_condition(trigger: &Trigger, query: &str, threshold: usize) -> bool {
    match &trigger.condition {
        Some(condition) => condition(query),
        None => query.chars().count() >= threshold && query.chars().any(|c| c != ' '),
    }
}
