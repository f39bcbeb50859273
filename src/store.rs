//! Holds the root state and routes dispatched actions through the root reducer.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::reducer::CombinedReducer;
use crate::state::{Action, RootState};

/// Callback invoked after every dispatch with the new root state.
pub type Listener = Arc<dyn Fn(&RootState) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Cheaply cloneable store handle.
///
/// Listeners run after the lock is released, so they may read state or
/// dispatch again.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<StoreInner>>,
}

struct StoreInner {
    state: RootState,
    reducer: CombinedReducer,
    listeners: Vec<(Subscription, Listener)>,
    next_id: u64,
}

impl Store {
    /// Creates a store and seeds every namespace with its initial state.
    pub fn new(reducer: CombinedReducer) -> Self {
        let state = reducer.reduce(None, &Action::init());
        Self::from_parts(reducer, state)
    }

    /// Creates a store starting from `preloaded`.
    ///
    /// Namespaces missing from `preloaded` still receive their initial state.
    pub fn with_state(reducer: CombinedReducer, preloaded: RootState) -> Self {
        let state = reducer.reduce(Some(&preloaded), &Action::init());
        Self::from_parts(reducer, state)
    }

    fn from_parts(reducer: CombinedReducer, state: RootState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                state,
                reducer,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Snapshot of the current root state.
    pub fn state(&self) -> RootState {
        self.inner.lock().state.clone()
    }

    pub fn dispatch(&self, action: Action) {
        let (state, listeners) = {
            let mut inner = self.inner.lock();
            tracing::trace!(action = %action.kind, "Dispatching action");
            let next = inner.reducer.reduce(Some(&inner.state), &action);
            inner.state = next;
            let listeners: Vec<Listener> =
                inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (inner.state.clone(), listeners)
        };

        for listener in listeners {
            listener(&state);
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&RootState) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = Subscription(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns false if `subscription` was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(id, _)| *id != subscription);
        inner.listeners.len() != before
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Store")
            .field("state", &inner.state)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::{combine_namespaced_reducers, NamespacedReducer};
    use crate::state::state_map;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store() -> Store {
        Store::new(combine_namespaced_reducers([NamespacedReducer::new(
            "counter",
            state_map([("count", 0)]),
        )
        .on("SET", |mut state, action| {
            if let Some(v) = action.get("value") {
                state.insert("count".into(), v.clone());
            }
            state
        })]))
    }

    #[test]
    fn new_store_holds_initial_state() {
        let state = store().state();
        assert_eq!(state.slice("counter"), Some(&state_map([("count", 0)])));
    }

    #[test]
    fn dispatch_replaces_state_and_notifies() {
        let store = store();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        store.subscribe(move |state| {
            assert_eq!(state.slice("counter").unwrap().get("count"), Some(&json!(4)));
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.dispatch(Action::new("SET").with("value", 4));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = store();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let sub = store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.dispatch(Action::new("SET").with("value", 1));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn listener_may_read_store() {
        let store = store();
        let handle = store.clone();
        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        store.subscribe(move |_| {
            *sink.lock() = Some(handle.state());
        });

        store.dispatch(Action::new("SET").with("value", 9));
        let observed = observed.lock().clone().unwrap();
        assert_eq!(observed.slice("counter").unwrap().get("count"), Some(&json!(9)));
    }

    #[test]
    fn preloaded_state_is_kept() {
        let reducer = combine_namespaced_reducers([NamespacedReducer::new(
            "counter",
            state_map([("count", 0)]),
        )]);
        let preloaded = RootState::new().with_slice("counter", state_map([("count", 42)]));
        let store = Store::with_state(reducer, preloaded);
        assert_eq!(
            store.state().slice("counter").unwrap().get("count"),
            Some(&json!(42))
        );
    }
}
