//! State containers and actions.
//!
//! Application state is a [`RootState`]: one [`StateMap`] per namespace.
//! Reducers never mutate a container in place, they return a replacement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered key-value container holding one namespace's state.
///
/// Keys are prop names. Iteration follows insertion order.
pub type StateMap = Map<String, Value>;

/// Global application state, keyed by namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootState {
    slices: BTreeMap<String, StateMap>,
}

impl RootState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state container registered under `namespace`.
    pub fn slice(&self, namespace: &str) -> Option<&StateMap> {
        self.slices.get(namespace)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.slices.contains_key(namespace)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.slices.keys().map(String::as_str)
    }

    /// Replaces the container for `namespace` wholesale.
    pub fn insert(&mut self, namespace: impl Into<String>, state: StateMap) {
        self.slices.insert(namespace.into(), state);
    }

    pub fn with_slice(mut self, namespace: impl Into<String>, state: StateMap) -> Self {
        self.insert(namespace, state);
        self
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// A tagged record describing an intended state transition.
///
/// Serializes as a flat object: `{ "type": "...", ...payload }`.
/// The payload never holds a `"type"` key, so the output always reads back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    payload: StateMap,
}

const TYPE_KEY: &str = "type";

/// Type dispatched once by [`crate::Store::new`] so every namespace
/// starts from its initial state.
pub const INIT_ACTION: &str = "@@namespace-connect/INIT";

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: StateMap::new(),
        }
    }

    /// Builds an action carrying `payload`.
    ///
    /// A `"type"` entry in `payload` is dropped with a warning.
    pub fn with_payload(kind: impl Into<String>, mut payload: StateMap) -> Self {
        let kind = kind.into();
        if let Some(shadowed) = payload.shift_remove(TYPE_KEY) {
            warn_type_in_payload(&kind, &shadowed);
        }
        Self { kind, payload }
    }

    /// Adds a payload field. `"type"` is reserved and ignored with a warning.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == TYPE_KEY {
            warn_type_in_payload(&self.kind, &value);
        } else {
            self.payload.insert(key, value);
        }
        self
    }

    pub fn payload(&self) -> &StateMap {
        &self.payload
    }

    pub(crate) fn init() -> Self {
        Self::new(INIT_ACTION)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

fn warn_type_in_payload(kind: &str, shadowed: &Value) {
    tracing::warn!(
        action = %kind,
        shadowed = %shadowed,
        "Dropping \"type\" from action payload, it would shadow the action type"
    );
}

/// Builds a [`StateMap`] from `(key, value)` pairs, preserving order.
pub fn state_map<K, V, I>(entries: I) -> StateMap
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
