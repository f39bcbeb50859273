//! Namespaced reducers and declarative state-to-component connectors.
//!
//! Root state is split into namespaces. Each namespace gets a
//! [`NamespacedReducer`] that routes actions by type, and reducers are
//! combined with [`combine_namespaced_reducers`] into the root reducer a
//! [`Store`] runs.
//!
//! On the view side a [`NamespaceConnector`] picks props and action creators
//! out of one namespace for a component, optionally renaming them with
//! [`prop_as`] or deriving them with [`PropOverrides`]. Several connectors
//! can feed one component through [`combine_connectors`].

pub mod binding;
pub mod combine;
pub mod config;
pub mod connector;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod prop_key;
pub mod reducer;
pub mod state;
pub mod store;

pub use binding::{
    action_creator, connect, default_merge_props, ActionCreator, ActionTable, BoundProps,
    Component, Connect, ConnectOptions, ConnectedComponent, MapStateFn, MergePropsFn, Props,
};
pub use combine::{combine_connectors, CombineArg, CombinedConnector, ConnectorEntry};
pub use config::{ConfigError, ConnectConfig};
pub use connector::{
    check_config_prerequisite_satisfied, create_namespace_connector, NamespaceConnector,
    PropOverride, PropOverrides,
};
pub use diagnostics::{Diagnostics, RecordingDiagnostics, TracingDiagnostics, Warning};
pub use error::ConnectError;
pub use prop_key::{keys, prop_as, prop_as_with, PropKey};
pub use reducer::{
    combine_namespaced_reducers, combine_namespaced_reducers_with, create_namespaced_reducer,
    CombinedReducer, NamespacedReducer, Reducer, ReducerFn,
};
pub use state::{state_map, Action, RootState, StateMap, INIT_ACTION};
pub use store::{Listener, Store, Subscription};
