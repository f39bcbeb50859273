use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{NamespacedReducer, Reducer};
use crate::diagnostics::{default_sink, Diagnostics, Warning};
use crate::state::{Action, RootState};

/// Root reducer: one child reducer per namespace.
///
/// The resulting state holds exactly one slice per registered namespace.
/// Slices for unregistered namespaces are dropped.
#[derive(Clone, Default)]
pub struct CombinedReducer {
    reducers: BTreeMap<String, Arc<dyn Reducer>>,
}

impl CombinedReducer {
    pub fn from_map(reducers: BTreeMap<String, Arc<dyn Reducer>>) -> Self {
        Self { reducers }
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.reducers.keys().map(String::as_str)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.reducers.contains_key(namespace)
    }

    /// Runs every child reducer over its own slice.
    ///
    /// A namespace without a slice in `root` (or no `root` at all) starts
    /// from that reducer's initial state.
    pub fn reduce(&self, root: Option<&RootState>, action: &Action) -> RootState {
        let mut next = RootState::new();
        for (namespace, reducer) in &self.reducers {
            let slice = root.and_then(|r| r.slice(namespace)).cloned();
            next.insert(namespace.clone(), reducer.reduce_or_init(slice, action));
        }
        next
    }
}

impl fmt::Debug for CombinedReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("namespaces", &self.reducers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Combines reducers keyed by their declared namespace.
///
/// A repeated namespace replaces the earlier reducer and is reported as a warning.
pub fn combine_namespaced_reducers<I>(reducers: I) -> CombinedReducer
where
    I: IntoIterator<Item = NamespacedReducer>,
{
    combine_namespaced_reducers_with(reducers, default_sink().as_ref())
}

pub fn combine_namespaced_reducers_with<I>(
    reducers: I,
    diagnostics: &dyn Diagnostics,
) -> CombinedReducer
where
    I: IntoIterator<Item = NamespacedReducer>,
{
    let mut map: BTreeMap<String, Arc<dyn Reducer>> = BTreeMap::new();
    for reducer in reducers {
        let namespace = reducer.namespace().to_string();
        tracing::debug!(namespace = %namespace, "Registering namespaced reducer");
        if map.insert(namespace.clone(), Arc::new(reducer)).is_some() {
            diagnostics.warn(Warning::NamespaceCollision { namespace });
        }
    }
    CombinedReducer::from_map(map)
}
