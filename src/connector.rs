//! Namespace connectors: pick props and actions out of one namespace.
//!
//! A [`NamespaceConnector`] is built once per namespace from the namespace's
//! action table and any prop overrides. Each component then asks it for the
//! props and actions it needs:
//!
//! ```text
//! connector.connect(keys(["count", "label"]), Some(keys(["increment"])), config)
//!     .apply(component)
//! ```
//!
//! Prop resolution, per requested key:
//!
//! 1. `Direct(name)` with an override for `name`: the override's value.
//! 2. `Direct(name)` present in state: passed through.
//! 3. `Renamed` whose source is present in state: passed through as the target.
//! 4. `Renamed` whose source has an override: the override's value, as the target.
//! 5. Anything else: a [`Warning::InvalidProp`], and the key is skipped.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::binding::{connect, ActionTable, Connect, MapStateFn};
use crate::config::ConnectConfig;
use crate::diagnostics::{default_sink, Diagnostics, Warning};
use crate::error::ConnectError;
use crate::prop_key::PropKey;
use crate::state::{RootState, StateMap};

/// Derives a prop from `(namespace state, own props, config)`.
pub type PropOverride =
    Arc<dyn Fn(&StateMap, &StateMap, &ConnectConfig) -> Result<Value, ConnectError> + Send + Sync>;

/// Prop overrides keyed by prop name.
#[derive(Clone, Default)]
pub struct PropOverrides {
    overrides: HashMap<String, PropOverride>,
}

impl PropOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, prop: impl Into<String>, derive: F) -> Self
    where
        F: Fn(&StateMap, &StateMap, &ConnectConfig) -> Result<Value, ConnectError>
            + Send
            + Sync
            + 'static,
    {
        self.overrides.insert(prop.into(), Arc::new(derive));
        self
    }

    pub fn get(&self, prop: &str) -> Option<&PropOverride> {
        self.overrides.get(prop)
    }
}

impl fmt::Debug for PropOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.overrides.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_set().entries(names).finish()
    }
}

/// Selects props and actions from one namespace for components.
#[derive(Clone)]
pub struct NamespaceConnector {
    namespace: String,
    actions: ActionTable,
    overrides: PropOverrides,
    diagnostics: Arc<dyn Diagnostics>,
}

/// Builds a connector for `namespace`.
pub fn create_namespace_connector(
    namespace: impl Into<String>,
    actions: ActionTable,
    overrides: PropOverrides,
) -> NamespaceConnector {
    NamespaceConnector::new(namespace)
        .with_actions(actions)
        .with_overrides(overrides)
}

impl NamespaceConnector {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            actions: ActionTable::new(),
            overrides: PropOverrides::new(),
            diagnostics: default_sink(),
        }
    }

    pub fn with_actions(mut self, actions: ActionTable) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_overrides(mut self, overrides: PropOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Routes invalid prop and action warnings to `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Binding exposing `props` from this namespace and `actions` from its
    /// action table.
    ///
    /// `None` for `actions` connects no actions.
    pub fn connect(
        &self,
        props: Vec<PropKey>,
        actions: Option<Vec<PropKey>>,
        config: ConnectConfig,
    ) -> Connect {
        connect(
            Some(self.state_mapper(props, config)),
            Some(self.dispatch_mapper(actions.as_deref())),
            None,
            None,
        )
    }

    /// State mapper for `props`, for use by [`crate::combine`].
    pub fn state_mapper(&self, props: Vec<PropKey>, config: ConnectConfig) -> MapStateFn {
        let connector = self.clone();
        Arc::new(move |root: &RootState, own_props: &StateMap| {
            connector.map_state(root, own_props, &props, &config)
        })
    }

    /// Action creators selected by `actions`, for use by [`crate::combine`].
    pub fn dispatch_mapper(&self, actions: Option<&[PropKey]>) -> ActionTable {
        let mut selected = ActionTable::new();
        for key in actions.unwrap_or_default() {
            match self.actions.get(key.source()) {
                Some(creator) => selected.insert(key.target(), creator.clone()),
                None => self.diagnostics.warn(Warning::InvalidAction {
                    connector: self.namespace.clone(),
                    action: key.to_string(),
                }),
            }
        }
        selected
    }

    /// Resolves `props` against this namespace's slice of `root`.
    pub fn map_state(
        &self,
        root: &RootState,
        own_props: &StateMap,
        props: &[PropKey],
        config: &ConnectConfig,
    ) -> Result<StateMap, ConnectError> {
        let state = root
            .slice(&self.namespace)
            .ok_or_else(|| ConnectError::MissingNamespace {
                connector: self.namespace.clone(),
            })?;

        let mut mapped = StateMap::new();
        for key in props {
            let value = match key {
                PropKey::Direct(name) => match self.overrides.get(name) {
                    Some(derive) => Some(derive(state, own_props, config)?),
                    None => state.get(name).cloned(),
                },
                PropKey::Renamed { source, .. } => match state.get(source) {
                    Some(value) => Some(value.clone()),
                    None => match self.overrides.get(source) {
                        Some(derive) => Some(derive(state, own_props, config)?),
                        None => None,
                    },
                },
            };

            match value {
                Some(value) => {
                    mapped.insert(key.target().to_string(), value);
                }
                None => self.diagnostics.warn(Warning::InvalidProp {
                    connector: self.namespace.clone(),
                    prop: key.to_string(),
                }),
            }
        }
        Ok(mapped)
    }
}

impl fmt::Debug for NamespaceConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceConnector")
            .field("namespace", &self.namespace)
            .field("actions", &self.actions)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

/// Validates the config a prop override depends on.
///
/// Call from inside an override before reading `config[required_config_name]`.
/// Fails if any name is empty or the config value is missing or not a string.
pub fn check_config_prerequisite_satisfied(
    connector_name: &str,
    prop_name: &str,
    required_config_name: &str,
    config: &ConnectConfig,
) -> Result<(), ConnectError> {
    if connector_name.is_empty() || prop_name.is_empty() || required_config_name.is_empty() {
        return Err(ConnectError::MissingPrerequisiteParameter {
            connector: connector_name.to_string(),
            prop: prop_name.to_string(),
            required: required_config_name.to_string(),
        });
    }

    if config.get_str(required_config_name).is_none() {
        return Err(ConnectError::InvalidConfig {
            connector: connector_name.to_string(),
            prop: prop_name.to_string(),
            required: required_config_name.to_string(),
        });
    }

    Ok(())
}
