use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Reducer;
use crate::state::{Action, StateMap};

/// Handler for a single action type.
pub type ReducerFn = Arc<dyn Fn(StateMap, &Action) -> StateMap + Send + Sync>;

/// Reducer tagged with the namespace it owns, dispatching by action type.
///
/// Unknown action types leave the state untouched.
#[derive(Clone)]
pub struct NamespacedReducer {
    namespace: String,
    initial_state: StateMap,
    handlers: HashMap<String, ReducerFn>,
}

impl NamespacedReducer {
    pub fn new(namespace: impl Into<String>, initial_state: StateMap) -> Self {
        Self {
            namespace: namespace.into(),
            initial_state,
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` for `action_type`, replacing any previous one.
    pub fn on<F>(mut self, action_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(StateMap, &Action) -> StateMap + Send + Sync + 'static,
    {
        self.handlers.insert(action_type.into(), Arc::new(handler));
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn handles(&self, action_type: &str) -> bool {
        self.handlers.contains_key(action_type)
    }
}

impl Reducer for NamespacedReducer {
    fn initial_state(&self) -> StateMap {
        self.initial_state.clone()
    }

    fn reduce(&self, state: StateMap, action: &Action) -> StateMap {
        match self.handlers.get(&action.kind) {
            Some(handler) => handler(state, action),
            None => state,
        }
    }
}

impl fmt::Debug for NamespacedReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut action_types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        action_types.sort_unstable();
        f.debug_struct("NamespacedReducer")
            .field("namespace", &self.namespace)
            .field("initial_state", &self.initial_state)
            .field("action_types", &action_types)
            .finish()
    }
}

/// Builds a [`NamespacedReducer`] from a table of handlers keyed by action type.
pub fn create_namespaced_reducer<K, I>(
    namespace: impl Into<String>,
    initial_state: StateMap,
    reducer_functions: I,
) -> NamespacedReducer
where
    K: Into<String>,
    I: IntoIterator<Item = (K, ReducerFn)>,
{
    let mut reducer = NamespacedReducer::new(namespace, initial_state);
    reducer.handlers = reducer_functions
        .into_iter()
        .map(|(action_type, handler)| (action_type.into(), handler))
        .collect();
    reducer
}
