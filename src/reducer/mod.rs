//! Reducers: pure `(state, action) -> state` functions, one per namespace.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ CombinedReducer ─┬─→ NamespacedReducer ("todos") ──→ RootState["todos"]
//!                            └─→ NamespacedReducer ("user")  ──→ RootState["user"]
//! ```
//!
//! A [`NamespacedReducer`] routes by action type through its handler table.
//! [`combine_namespaced_reducers`] keys each one by its namespace.

mod combined;
mod namespaced;

pub use combined::{
    combine_namespaced_reducers, combine_namespaced_reducers_with, CombinedReducer,
};
pub use namespaced::{create_namespaced_reducer, NamespacedReducer, ReducerFn};

use crate::state::{Action, StateMap};

/// Reducer over one namespace's state container.
///
/// `reduce` is the only place state transitions happen. It must be pure:
/// the returned container replaces the input wholesale.
pub trait Reducer: Send + Sync {
    /// State used when the namespace has no slice yet.
    fn initial_state(&self) -> StateMap;

    fn reduce(&self, state: StateMap, action: &Action) -> StateMap;

    /// Reduces `state`, starting from [`Reducer::initial_state`] when there is none.
    fn reduce_or_init(&self, state: Option<StateMap>, action: &Action) -> StateMap {
        let state = state.unwrap_or_else(|| self.initial_state());
        self.reduce(state, action)
    }
}
