//! End-to-end tests for the to-do slice behind a real store.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use todo_demo::{TODO_SLICE, TodoList, todo_reducer};
use uniflow_core::{Action, CombinedReducer, ReduceError, combine, slice};
use uniflow_runtime::{Store, StoreError};
use uniflow_testing::FollowerProbe;

fn todo_store() -> Store<CombinedReducer> {
    Store::new(combine([slice(TODO_SLICE, todo_reducer)]), None).unwrap()
}

fn current_list(store: &Store<CombinedReducer>) -> TodoList {
    store
        .state(|state| serde_json::from_value((*state[TODO_SLICE]).clone()).unwrap())
        .unwrap()
}

#[test]
fn the_store_starts_with_an_empty_list() {
    let store = todo_store();
    assert!(current_list(&store).is_empty());
}

#[test]
fn add_then_delete_round_trip() {
    let store = todo_store();

    store
        .dispatch_value(json!({
            "type": "ADD",
            "target": TODO_SLICE,
            "payload": {"text": "buy milk"},
        }))
        .unwrap();
    store
        .dispatch_value(json!({
            "type": "ADD",
            "target": TODO_SLICE,
            "payload": {"text": "walk the dog"},
        }))
        .unwrap();

    let list = current_list(&store);
    assert_eq!(list.len(), 2);

    let first_id = list.iter().next().unwrap().id.clone();
    store
        .dispatch_value(json!({
            "type": "DELETE",
            "target": TODO_SLICE,
            "payload": {"id": first_id},
        }))
        .unwrap();

    let list = current_list(&store);
    assert_eq!(list.len(), 1);
    assert_eq!(list.iter().next().unwrap().text, "walk the dog");
}

#[test]
fn done_marks_the_item_and_followers_see_it() {
    let store = todo_store();
    let probe = FollowerProbe::new();
    let _follow = store.follow(probe.callback());

    store
        .dispatch(
            Action::new("ADD")
                .with_target(TODO_SLICE)
                .with_payload(json!({"text": "write tests"})),
        )
        .unwrap();

    let id = current_list(&store).iter().next().unwrap().id.clone();
    store
        .dispatch(
            Action::new("DONE")
                .with_target(TODO_SLICE)
                .with_payload(json!({"id": id})),
        )
        .unwrap();

    assert_eq!(probe.notifications(), 2);
    assert!(current_list(&store).iter().next().unwrap().done);
}

#[test]
fn a_malformed_add_surfaces_as_a_contract_error() {
    let store = todo_store();

    let result = store.dispatch(Action::new("ADD").with_target(TODO_SLICE));
    assert_eq!(
        result,
        Err(StoreError::Reduce(ReduceError::SliceReturnedNone {
            key: TODO_SLICE.to_owned(),
            kind: "ADD".to_owned(),
        }))
    );

    // The list is untouched.
    assert!(current_list(&store).is_empty());
}
