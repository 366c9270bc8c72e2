//! The `toDo` slice reducer.
//!
//! A plain function of the slice-reducer shape: given the previous slice
//! state (a JSON array of to-do items, or nothing before initialization) and
//! an action, produce the next slice state. Unrecognized action kinds hand
//! back the state they were given — the same `Rc`, so the combinator reports
//! the slice unchanged.
//!
//! Returning `None` (malformed slice state, or a payload missing its
//! required fields) is a reducer contract violation that the combinator
//! surfaces as an error out of the dispatch.

use crate::types::{TodoId, TodoItem, TodoList};
use uniflow_core::{Action, SliceState};

/// Key under which the to-do list lives in the combined state map.
pub const TODO_SLICE: &str = "toDo";

/// Reduces the `toDo` slice.
///
/// - `ADD` with payload `{"text": ...}` appends one item with a generated id
/// - `DELETE` with payload `{"id": ...}` removes exactly that item,
///   preserving the order of the rest
/// - `DONE` with payload `{"id": ...}` marks exactly that item done
/// - anything else returns the given state unchanged (an empty list before
///   initialization)
#[must_use]
pub fn todo_reducer(state: Option<SliceState>, action: &Action) -> Option<SliceState> {
    let mut list = match state.as_deref() {
        Some(value) => serde_json::from_value::<TodoList>(value.clone()).ok()?,
        None => TodoList::new(),
    };

    match action.kind() {
        "ADD" => {
            let text = action.payload()?.get("text")?.as_str()?.to_owned();
            list.push(TodoItem::new(TodoId::new(), text));
            to_slice(&list)
        }
        "DELETE" => {
            let id = payload_id(action)?;
            list.remove(&id);
            to_slice(&list)
        }
        "DONE" => {
            let id = payload_id(action)?;
            list.mark_done(&id);
            to_slice(&list)
        }
        _ => Some(state.unwrap_or_else(|| SliceState::new(serde_json::json!([])))),
    }
}

fn payload_id(action: &Action) -> Option<TodoId> {
    serde_json::from_value(action.payload()?.get("id")?.clone()).ok()
}

fn to_slice(list: &TodoList) -> Option<SliceState> {
    serde_json::to_value(list).ok().map(SliceState::new)
}
