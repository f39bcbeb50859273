mod common;

use common::{add_todo, store, todos_reducer, user_reducer};
use namespace_connect::{
    combine_namespaced_reducers, create_namespaced_reducer, state_map, Action, Reducer, ReducerFn,
    StateMap,
};
use serde_json::json;
use std::sync::Arc;

#[test]
fn unknown_action_is_identity() {
    let state = state_map([("items", json!(["a"])), ("filter", json!("done"))]);
    let next = todos_reducer().reduce(state.clone(), &Action::new("NOT_A_TODO_ACTION"));
    assert_eq!(next, state);
}

#[test]
fn registered_action_returns_handler_result() {
    let handler: ReducerFn =
        Arc::new(|_: StateMap, action: &Action| state_map([("last", action.kind.clone())]));
    let reducer = create_namespaced_reducer("log", StateMap::new(), [("PING", handler.clone())]);

    let state = state_map([("last", "nothing")]);
    let action = Action::new("PING");
    assert_eq!(reducer.reduce(state.clone(), &action), handler(state, &action));
}

#[test]
fn combined_root_has_one_slice_per_namespace() {
    let root = store().state();
    assert_eq!(root.namespaces().collect::<Vec<_>>(), vec!["todos", "user"]);
    assert_eq!(root.slice("user"), Some(&state_map([("name", "anon")])));
}

#[test]
fn dispatch_only_touches_matching_namespace() {
    let store = store();
    let before = store.state();

    store.dispatch(add_todo("write tests"));
    let after = store.state();

    assert_eq!(after.slice("user"), before.slice("user"));
    assert_eq!(
        after.slice("todos").unwrap().get("items"),
        Some(&json!(["write tests"]))
    );
}

#[test]
fn same_action_type_reaches_every_namespace_that_handles_it() {
    let left = create_namespaced_reducer(
        "left",
        StateMap::new(),
        [("RESET", Arc::new(|_: StateMap, _: &Action| state_map([("reset", true)])) as ReducerFn)],
    );
    let right = create_namespaced_reducer(
        "right",
        StateMap::new(),
        [("RESET", Arc::new(|_: StateMap, _: &Action| state_map([("reset", true)])) as ReducerFn)],
    );
    let root = combine_namespaced_reducers([left, right, user_reducer()])
        .reduce(None, &Action::new("RESET"));

    assert_eq!(root.slice("left"), Some(&state_map([("reset", true)])));
    assert_eq!(root.slice("right"), Some(&state_map([("reset", true)])));
    assert_eq!(root.slice("user"), Some(&state_map([("name", "anon")])));
}
