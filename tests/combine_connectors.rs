mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{add_todo, no_own_props, store, todos_connector, user_connector};
use namespace_connect::{
    combine_connectors, keys, prop_as, state_map, ActionTable, BoundProps, CombineArg,
    CombinedConnector, ConnectError, ConnectOptions, ConnectorEntry, MapStateFn,
    RecordingDiagnostics, RootState, StateMap,
};
use serde_json::{json, Value};

#[test]
fn props_from_two_namespaces_merge() {
    let sink = RecordingDiagnostics::new();
    let props = combine_connectors([
        ConnectorEntry::new(&todos_connector(&sink)).props(keys(["filter"])),
        ConnectorEntry::new(&user_connector(&sink)).props(keys(["name"])),
    ])
    .unwrap()
    .build()
    .props(&store().state(), &no_own_props())
    .unwrap();

    assert_eq!(
        props.values,
        state_map([("filter", json!("all")), ("name", json!("anon"))])
    );
}

#[test]
fn later_entry_wins_shared_prop_name() {
    let sink = RecordingDiagnostics::new();
    let props = combine_connectors([
        ConnectorEntry::new(&todos_connector(&sink)).props(vec![prop_as("filter", "label")]),
        ConnectorEntry::new(&user_connector(&sink)).props(vec![prop_as("name", "label")]),
    ])
    .unwrap()
    .build()
    .props(&store().state(), &no_own_props())
    .unwrap();

    assert_eq!(props.values, state_map([("label", "anon")]));
}

#[test]
fn single_nested_list_is_invalid_first_argument() {
    let sink = RecordingDiagnostics::new();
    let todos = todos_connector(&sink);
    let user = user_connector(&sink);

    let err = combine_connectors([vec![
        ConnectorEntry::new(&todos).props(keys(["items"])),
        ConnectorEntry::new(&user).props(keys(["name"])),
    ]])
    .unwrap_err();

    assert_eq!(err, ConnectError::InvalidFirstArgument);
    assert!(err.to_string().starts_with("Invalid first argument"));
    assert!(sink.is_empty());
}

#[test]
fn chained_push_and_custom_mapping() {
    let sink = RecordingDiagnostics::new();
    let store = store();
    store.dispatch(add_todo("a"));

    let owner: MapStateFn = Arc::new(|root: &RootState, own: &StateMap| {
        let name = root
            .slice("user")
            .and_then(|s| s.get("name"))
            .cloned()
            .unwrap_or(Value::Null);
        let mut mapped = state_map([("owner", name)]);
        if let Some(id) = own.get("id") {
            mapped.insert("ownerId".into(), id.clone());
        }
        Ok(mapped)
    });

    let component = CombinedConnector::new()
        .push(
            ConnectorEntry::new(&todos_connector(&sink))
                .props(keys(["items", "count"]))
                .actions(keys(["addTodo"])),
        )
        .push(ConnectorEntry::new(&user_connector(&sink)).actions(keys(["rename"])))
        .with_custom_mapping(Some(owner), Some(ActionTable::new()), None, None)
        .apply(|props: &BoundProps| {
            props.call("rename", json!("kim"));
            props.values().clone()
        });

    let values = component.render(&store, &state_map([("id", 3)])).unwrap();
    assert_eq!(values.get("items"), Some(&json!(["a"])));
    assert_eq!(values.get("count"), Some(&json!(1)));
    assert_eq!(values.get("owner"), Some(&json!("anon")));
    assert_eq!(values.get("ownerId"), Some(&json!(3)));
    assert_eq!(values.get("id"), Some(&json!(3)));

    let renamed = store.state().slice("user").cloned().unwrap();
    assert_eq!(renamed.get("name"), Some(&json!("kim")));
}

#[test]
fn options_from_custom_mapping_apply() {
    let sink = RecordingDiagnostics::new();
    let store = store();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let counting: MapStateFn = Arc::new(move |_: &RootState, _: &StateMap| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(StateMap::new())
    });

    let component = combine_connectors([CombineArg::from(&user_connector(&sink))])
        .unwrap()
        .with_custom_mapping(
            Some(counting),
            None,
            None,
            Some(ConnectOptions {
                pure: false,
                display_name: Some("UserBadge".into()),
            }),
        )
        .apply(|_: &BoundProps| ());

    component.render(&store, &no_own_props()).unwrap();
    component.render(&store, &no_own_props()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(component.display_name(), Some("UserBadge"));
}

#[test]
fn fatal_error_from_any_connector_stops_render() {
    let sink = RecordingDiagnostics::new();
    let ghost = namespace_connect::NamespaceConnector::new("ghost");
    let component = combine_connectors([
        ConnectorEntry::new(&user_connector(&sink)).props(keys(["name"])),
        ConnectorEntry::new(&ghost).props(keys(["x"])),
    ])
    .unwrap()
    .apply(|_: &BoundProps| unreachable!("render must not run"));

    let err = component.render(&store(), &no_own_props()).unwrap_err();
    assert_eq!(
        err,
        ConnectError::MissingNamespace {
            connector: "ghost".into()
        }
    );
}
