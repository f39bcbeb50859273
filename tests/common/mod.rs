//! Shared fixtures: a small todo app with `todos` and `user` namespaces.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;

use namespace_connect::{
    action_creator, combine_namespaced_reducers, state_map, Action, ActionTable, NamespaceConnector,
    NamespacedReducer, PropOverrides, RecordingDiagnostics, StateMap, Store,
};
use serde_json::{json, Value};

pub fn todos_reducer() -> NamespacedReducer {
    NamespacedReducer::new(
        "todos",
        state_map([("items", json!([])), ("filter", json!("all"))]),
    )
    .on("ADD_TODO", |mut state, action| {
        let text = action.get("text").cloned().unwrap_or(Value::Null);
        if let Some(Value::Array(items)) = state.get_mut("items") {
            items.push(text);
        }
        state
    })
    .on("SET_FILTER", |mut state, action| {
        if let Some(filter) = action.get("value") {
            state.insert("filter".into(), filter.clone());
        }
        state
    })
}

pub fn user_reducer() -> NamespacedReducer {
    NamespacedReducer::new("user", state_map([("name", json!("anon"))])).on(
        "RENAME",
        |mut state, action| {
            if let Some(name) = action.get("value") {
                state.insert("name".into(), name.clone());
            }
            state
        },
    )
}

pub fn store() -> Store {
    Store::new(combine_namespaced_reducers([todos_reducer(), user_reducer()]))
}

pub fn todo_actions() -> ActionTable {
    ActionTable::new()
        .with("addTodo", |arg| action_creator("ADD_TODO")(json!({ "text": arg })))
        .with("setFilter", |arg| action_creator("SET_FILTER")(arg))
}

pub fn user_actions() -> ActionTable {
    ActionTable::new().with("rename", |arg| action_creator("RENAME")(arg))
}

pub fn todos_connector(sink: &Arc<RecordingDiagnostics>) -> NamespaceConnector {
    NamespaceConnector::new("todos")
        .with_actions(todo_actions())
        .with_overrides(PropOverrides::new().with("count", |state, _, _| {
            let count = state
                .get("items")
                .and_then(Value::as_array)
                .map(Vec::len)
                .unwrap_or(0);
            Ok(json!(count))
        }))
        .with_diagnostics(sink.clone())
}

pub fn user_connector(sink: &Arc<RecordingDiagnostics>) -> NamespaceConnector {
    NamespaceConnector::new("user")
        .with_actions(user_actions())
        .with_diagnostics(sink.clone())
}

pub fn no_own_props() -> StateMap {
    StateMap::new()
}

pub fn add_todo(text: &str) -> Action {
    Action::new("ADD_TODO").with("text", text)
}
