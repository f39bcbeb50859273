//! Binds slices of root state and action creators to components.
//!
//! [`connect`] takes a state mapper, a dispatch table, an optional merge
//! function and options, and returns a [`Connect`]. Applying it to a
//! [`Component`] yields a [`ConnectedComponent`] that recomputes its props
//! from a [`Store`] on each render.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::ConnectError;
use crate::state::{Action, RootState, StateMap};
use crate::store::Store;

/// Builds an action from a caller-supplied argument.
pub type ActionCreator = Arc<dyn Fn(Value) -> Action + Send + Sync>;

/// Selects state props from `(root state, own props)`.
pub type MapStateFn =
    Arc<dyn Fn(&RootState, &StateMap) -> Result<StateMap, ConnectError> + Send + Sync>;

/// Combines `(state props, dispatch props, own props)` into final props.
pub type MergePropsFn = Arc<dyn Fn(StateMap, ActionTable, &StateMap) -> Props + Send + Sync>;

/// Action creator whose payload is its argument.
///
/// Object arguments become the payload (minus any `"type"` key), `null`
/// means no payload, anything else is stored under `"value"`.
pub fn action_creator(kind: impl Into<String>) -> ActionCreator {
    let kind = kind.into();
    Arc::new(move |arg: Value| match arg {
        Value::Object(payload) => Action::with_payload(kind.clone(), payload),
        Value::Null => Action::new(kind.clone()),
        other => Action::new(kind.clone()).with("value", other),
    })
}

/// Named action creators.
#[derive(Clone, Default)]
pub struct ActionTable {
    creators: BTreeMap<String, ActionCreator>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, name: impl Into<String>, creator: F) -> Self
    where
        F: Fn(Value) -> Action + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(creator));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, creator: ActionCreator) {
        self.creators.insert(name.into(), creator);
    }

    pub fn get(&self, name: &str) -> Option<&ActionCreator> {
        self.creators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.creators.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.creators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }

    /// Shallow merge; entries in `other` win on collision.
    pub fn merge(&mut self, other: &ActionTable) {
        for (name, creator) in &other.creators {
            self.creators.insert(name.clone(), creator.clone());
        }
    }
}

impl<K: Into<String>> FromIterator<(K, ActionCreator)> for ActionTable {
    fn from_iter<I: IntoIterator<Item = (K, ActionCreator)>>(iter: I) -> Self {
        Self {
            creators: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.creators.keys()).finish()
    }
}

/// Final props handed to a component: plain values plus action creators.
#[derive(Debug, Clone, Default)]
pub struct Props {
    pub values: StateMap,
    pub actions: ActionTable,
}

impl Props {
    /// Attaches a store so action creators dispatch when called.
    pub fn bind(self, store: &Store) -> BoundProps {
        BoundProps {
            props: self,
            store: store.clone(),
        }
    }
}

/// `{...own, ...state}` for values, dispatch table for actions.
pub fn default_merge_props(
    state_props: StateMap,
    dispatch_props: ActionTable,
    own_props: &StateMap,
) -> Props {
    let mut values = own_props.clone();
    values.extend(state_props);
    Props {
        values,
        actions: dispatch_props,
    }
}

/// Props bound to a store.
pub struct BoundProps {
    props: Props,
    store: Store,
}

impl BoundProps {
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.props.values.get(key)
    }

    pub fn values(&self) -> &StateMap {
        &self.props.values
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.props.actions.contains(name)
    }

    /// Builds the named action from `arg` and dispatches it.
    ///
    /// Returns the dispatched action, or `None` if no such action was connected.
    pub fn call(&self, name: &str, arg: Value) -> Option<Action> {
        let creator = self.props.actions.get(name)?;
        let action = creator(arg);
        self.store.dispatch(action.clone());
        Some(action)
    }

    pub fn props(&self) -> &Props {
        &self.props
    }
}

impl fmt::Debug for BoundProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundProps")
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

/// Anything that renders from bound props.
pub trait Component {
    type Output;

    fn render(&self, props: &BoundProps) -> Self::Output;
}

impl<F, O> Component for F
where
    F: Fn(&BoundProps) -> O,
{
    type Output = O;

    fn render(&self, props: &BoundProps) -> O {
        self(props)
    }
}

#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Reuse the last props when root state and own props are unchanged.
    pub pure: bool,
    /// Name used in log output.
    pub display_name: Option<String>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            pure: true,
            display_name: None,
        }
    }
}

/// A component binding, ready to wrap components.
#[derive(Clone)]
pub struct Connect {
    map_state: Option<MapStateFn>,
    map_dispatch: ActionTable,
    merge_props: MergePropsFn,
    options: ConnectOptions,
}

/// Builds a [`Connect`].
///
/// Without `map_state` no state props are produced; without `merge_props`
/// [`default_merge_props`] is used.
pub fn connect(
    map_state: Option<MapStateFn>,
    map_dispatch: Option<ActionTable>,
    merge_props: Option<MergePropsFn>,
    options: Option<ConnectOptions>,
) -> Connect {
    Connect {
        map_state,
        map_dispatch: map_dispatch.unwrap_or_default(),
        merge_props: merge_props.unwrap_or_else(|| Arc::new(default_merge_props) as MergePropsFn),
        options: options.unwrap_or_default(),
    }
}

impl Connect {
    /// Computes merged props without a component.
    pub fn props(&self, root: &RootState, own_props: &StateMap) -> Result<Props, ConnectError> {
        let state_props = match &self.map_state {
            Some(map_state) => map_state(root, own_props)?,
            None => StateMap::new(),
        };
        Ok((self.merge_props)(state_props, self.map_dispatch.clone(), own_props))
    }

    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    pub fn apply<C: Component>(&self, component: C) -> ConnectedComponent<C> {
        ConnectedComponent {
            inner: component,
            connect: self.clone(),
            cache: Mutex::new(None),
        }
    }
}

impl fmt::Debug for Connect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connect")
            .field("map_state", &self.map_state.is_some())
            .field("map_dispatch", &self.map_dispatch)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

struct CachedProps {
    root: RootState,
    own_props: StateMap,
    props: Props,
}

/// A component wrapped by [`Connect::apply`].
pub struct ConnectedComponent<C> {
    inner: C,
    connect: Connect,
    cache: Mutex<Option<CachedProps>>,
}

impl<C: Component> ConnectedComponent<C> {
    /// Props the wrapped component would receive right now.
    pub fn props(&self, store: &Store, own_props: &StateMap) -> Result<Props, ConnectError> {
        let root = store.state();
        let pure = self.connect.options.pure;

        if pure {
            if let Some(cached) = self.cache.lock().as_ref() {
                if cached.root == root && &cached.own_props == own_props {
                    return Ok(cached.props.clone());
                }
            }
        }

        tracing::trace!(
            component = self.display_name().unwrap_or("anonymous"),
            "Recomputing connected props"
        );
        let props = self.connect.props(&root, own_props)?;

        if pure {
            *self.cache.lock() = Some(CachedProps {
                root,
                own_props: own_props.clone(),
                props: props.clone(),
            });
        }
        Ok(props)
    }

    pub fn render(&self, store: &Store, own_props: &StateMap) -> Result<C::Output, ConnectError> {
        let props = self.props(store, own_props)?.bind(store);
        Ok(self.inner.render(&props))
    }

    pub fn display_name(&self) -> Option<&str> {
        self.connect.options.display_name.as_deref()
    }
}
