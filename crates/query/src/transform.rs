use std::fmt;
use std::sync::Arc;

type ManipulateFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Optional query capability. When it carries a manipulation function the
/// function's output becomes the effective query.
#[derive(Clone, Default)]
pub struct QueryHook {
    manipulate: Option<ManipulateFn>,
}

impl QueryHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manipulate<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            manipulate: Some(Arc::new(f)),
        }
    }

    pub fn has_manipulate(&self) -> bool {
        self.manipulate.is_some()
    }
}

impl fmt::Debug for QueryHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryHook")
            .field("manipulate", &self.manipulate.is_some())
            .finish()
    }
}

/// Produce the effective query.
///
/// The manipulation output is not validated; an empty string is passed on
/// as-is and left for the trigger to judge.
pub fn prepare_query_value(input: String, hook: Option<&QueryHook>) -> String {
    match hook.and_then(|hook| hook.manipulate.as_ref()) {
        Some(manipulate) => manipulate(&input),
        None => input,
    }
}
