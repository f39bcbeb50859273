//! Merges several connectors into one binding for a single component.
//!
//! ```text
//! combine_connectors([ConnectorEntry::new(&todos).props(keys(["items"])),
//!                     ConnectorEntry::new(&user).props(keys(["name"]))])?
//!     .push(ConnectorEntry::new(&filters).props(keys(["active"])))
//!     .with_custom_mapping(Some(map_extra), None, None, None)
//!     .apply(component)
//! ```
//!
//! State mappers run in push order and their outputs are merged left to
//! right, so a later entry wins on key collision. Dispatch tables merge
//! the same way.

use std::fmt;
use std::sync::Arc;

use crate::binding::{
    connect, ActionTable, Component, Connect, ConnectOptions, ConnectedComponent, MapStateFn,
    MergePropsFn,
};
use crate::config::ConnectConfig;
use crate::connector::NamespaceConnector;
use crate::error::ConnectError;
use crate::prop_key::PropKey;
use crate::state::{RootState, StateMap};

/// One connector plus what to take from it.
#[derive(Debug, Clone)]
pub struct ConnectorEntry {
    connector: NamespaceConnector,
    props: Vec<PropKey>,
    actions: Option<Vec<PropKey>>,
    config: ConnectConfig,
}

impl ConnectorEntry {
    pub fn new(connector: &NamespaceConnector) -> Self {
        Self {
            connector: connector.clone(),
            props: Vec::new(),
            actions: None,
            config: ConnectConfig::new(),
        }
    }

    pub fn props(mut self, props: Vec<PropKey>) -> Self {
        self.props = props;
        self
    }

    pub fn actions(mut self, actions: Vec<PropKey>) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn config(mut self, config: ConnectConfig) -> Self {
        self.config = config;
        self
    }
}

impl From<&NamespaceConnector> for ConnectorEntry {
    fn from(connector: &NamespaceConnector) -> Self {
        Self::new(connector)
    }
}

/// A positional argument to [`combine_connectors`].
///
/// `Nested` is never valid; it exists so a list of entries passed where a
/// single entry belongs is rejected up front.
#[derive(Debug, Clone)]
pub enum CombineArg {
    Entry(ConnectorEntry),
    Nested(Vec<ConnectorEntry>),
}

impl From<ConnectorEntry> for CombineArg {
    fn from(entry: ConnectorEntry) -> Self {
        CombineArg::Entry(entry)
    }
}

impl From<&NamespaceConnector> for CombineArg {
    fn from(connector: &NamespaceConnector) -> Self {
        CombineArg::Entry(ConnectorEntry::new(connector))
    }
}

impl From<Vec<ConnectorEntry>> for CombineArg {
    fn from(entries: Vec<ConnectorEntry>) -> Self {
        CombineArg::Nested(entries)
    }
}

/// Starts a [`CombinedConnector`] from `entries`.
///
/// Fails before any mapping runs if an argument is a nested list of entries.
pub fn combine_connectors<A, I>(entries: I) -> Result<CombinedConnector, ConnectError>
where
    A: Into<CombineArg>,
    I: IntoIterator<Item = A>,
{
    let mut combined = CombinedConnector::new();
    for (index, arg) in entries.into_iter().enumerate() {
        match arg.into() {
            CombineArg::Entry(entry) => combined = combined.push(entry),
            CombineArg::Nested(_) if index == 0 => return Err(ConnectError::InvalidFirstArgument),
            CombineArg::Nested(_) => return Err(ConnectError::InvalidArgument { index }),
        }
    }
    Ok(combined)
}

/// Accumulates state mappers and dispatch tables for one component.
#[derive(Clone, Default)]
pub struct CombinedConnector {
    state_mappers: Vec<MapStateFn>,
    dispatch_tables: Vec<ActionTable>,
    merge_props: Option<MergePropsFn>,
    options: Option<ConnectOptions>,
}

impl CombinedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a connector entry after everything pushed so far.
    pub fn push(mut self, entry: impl Into<ConnectorEntry>) -> Self {
        let entry = entry.into();
        self.state_mappers
            .push(entry.connector.state_mapper(entry.props, entry.config));
        self.dispatch_tables
            .push(entry.connector.dispatch_mapper(entry.actions.as_deref()));
        self
    }

    /// Appends a hand-written state mapper and/or dispatch table, and sets
    /// the merge function and options.
    ///
    /// Calling this twice replaces `merge_props` and `options` from the
    /// first call, even with `None`.
    pub fn with_custom_mapping(
        mut self,
        map_state: Option<MapStateFn>,
        map_dispatch: Option<ActionTable>,
        merge_props: Option<MergePropsFn>,
        options: Option<ConnectOptions>,
    ) -> Self {
        if let Some(map_state) = map_state {
            self.state_mappers.push(map_state);
        }
        if let Some(map_dispatch) = map_dispatch {
            self.dispatch_tables.push(map_dispatch);
        }
        self.merge_props = merge_props;
        self.options = options;
        self
    }

    /// Finalizes into a single binding.
    pub fn build(&self) -> Connect {
        let mappers = self.state_mappers.clone();
        let map_state: MapStateFn = Arc::new(move |root: &RootState, own_props: &StateMap| {
            let mut merged = StateMap::new();
            for mapper in &mappers {
                merged.extend(mapper(root, own_props)?);
            }
            Ok(merged)
        });

        let mut map_dispatch = ActionTable::new();
        for table in &self.dispatch_tables {
            map_dispatch.merge(table);
        }

        connect(
            Some(map_state),
            Some(map_dispatch),
            self.merge_props.clone(),
            self.options.clone(),
        )
    }

    /// Builds and applies to `component` in one step.
    pub fn apply<C: Component>(&self, component: C) -> ConnectedComponent<C> {
        self.build().apply(component)
    }
}

impl fmt::Debug for CombinedConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedConnector")
            .field("state_mappers", &self.state_mappers.len())
            .field("dispatch_tables", &self.dispatch_tables)
            .field("merge_props", &self.merge_props.is_some())
            .field("options", &self.options)
            .finish()
    }
}
