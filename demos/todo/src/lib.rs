//! To-do list demo for the uniflow store.
//!
//! The library half holds the domain: a to-do list slice (`toDo`) whose
//! reducer handles `ADD`, `DELETE`, and `DONE` actions over a JSON array of
//! `{id, text, done}` items. The binary half (`main.rs`) wires the slice
//! into a store and drives it from stdin, standing in for the event
//! handlers a UI layer would register.

/// The `toDo` slice reducer.
pub mod reducer;

/// Domain types for the to-do list.
pub mod types;

pub use reducer::{TODO_SLICE, todo_reducer};
pub use types::{TodoId, TodoItem, TodoList};
