//! To-do demo binary.
//!
//! Wires the `toDo` slice into a store and drives it from stdin: `add`,
//! `done`, and `delete` commands dispatch raw JSON action records through
//! the dynamic boundary, and a follower re-renders the list after every
//! dispatch — the same shape a UI layer would have, minus the DOM.

use serde_json::json;
use std::io::{BufRead, Write};
use todo_demo::{TODO_SLICE, TodoId, TodoList, todo_reducer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uniflow_core::{CombinedReducer, combine, slice};
use uniflow_runtime::Store;

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_demo=debug,uniflow_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = match Store::new(combine([slice(TODO_SLICE, todo_reducer)]), None) {
        Ok(store) => store,
        Err(error) => {
            eprintln!("failed to build the store: {error}");
            return;
        }
    };

    // Render after every dispatch, exactly like a UI subscription would.
    let _render = store.follow({
        let store = store.clone();
        move || render(&store)
    });

    println!("=== To-do demo: uniflow store ===");
    println!("commands: add <text> | done <n> | delete <n> | list | quit\n");
    prompt();

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let input = line.trim();
        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "" => {}
            "quit" | "exit" => break,
            "list" => render(&store),
            "add" if !rest.is_empty() => {
                dispatch(
                    &store,
                    json!({
                        "type": "ADD",
                        "target": TODO_SLICE,
                        "payload": {"text": rest},
                    }),
                );
            }
            "done" | "delete" => {
                if let Some(id) = resolve_index(&store, rest) {
                    let kind = if command == "done" { "DONE" } else { "DELETE" };
                    dispatch(
                        &store,
                        json!({
                            "type": kind,
                            "target": TODO_SLICE,
                            "payload": {"id": id},
                        }),
                    );
                } else {
                    eprintln!("no item number {rest}");
                }
            }
            _ => eprintln!("unknown command: {input}"),
        }
        prompt();
    }
}

fn dispatch(store: &Store<CombinedReducer>, record: serde_json::Value) {
    if let Err(error) = store.dispatch_value(record) {
        eprintln!("dispatch failed: {error}");
    }
}

/// Maps a 1-based list position to the item's id, reading current state.
fn resolve_index(store: &Store<CombinedReducer>, position: &str) -> Option<TodoId> {
    let index = position.parse::<usize>().ok()?.checked_sub(1)?;
    store
        .state(|state| {
            let list = read_list(state.get(TODO_SLICE)?);
            list.iter().nth(index).map(|item| item.id.clone())
        })
        .ok()
        .flatten()
}

fn render(store: &Store<CombinedReducer>) {
    let Ok(Some(list)) = store.state(|state| state.get(TODO_SLICE).map(read_list)) else {
        return;
    };

    if list.is_empty() {
        println!("(nothing to do)");
        return;
    }
    for (n, item) in list.iter().enumerate() {
        let marker = if item.done { "x" } else { " " };
        println!("{:>2}. [{marker}] {}", n + 1, item.text);
    }
}

fn read_list(value: &uniflow_core::SliceState) -> TodoList {
    serde_json::from_value((**value).clone()).unwrap_or_default()
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
