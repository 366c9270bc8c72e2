//! # Uniflow Core
//!
//! Core types for the uniflow unidirectional state container.
//!
//! This crate provides the building blocks consumed by the store runtime:
//!
//! - **Action**: a record describing a requested state transition, carrying a
//!   kind tag, an optional routing target, and an optional payload
//! - **Reducer**: pure function `(previous state, action) → next state`
//! - **Combinator**: composes named slice reducers into one root reducer,
//!   routing each action either to every slice (init/wildcard broadcast) or
//!   to exactly one slice selected by the action's target
//!
//! ## Architecture Principles
//!
//! - Unidirectional data flow: actions in, state out, followers notified
//! - Pure reducers: no hidden I/O, errors are explicit `Result`s
//! - Single-threaded, synchronous, in-memory only
//!
//! ## Example
//!
//! ```
//! use uniflow_core::{combine, slice, Action, Reducer, SliceState};
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! // A slice reducer is any plain function of the right shape.
//! fn counter(state: Option<SliceState>, action: &Action) -> Option<SliceState> {
//!     let count = state.as_deref().and_then(|v| v.as_i64()).unwrap_or(0);
//!     match action.kind() {
//!         "INCREMENT" => Some(Rc::new(json!(count + 1))),
//!         _ => Some(state.unwrap_or_else(|| Rc::new(json!(0)))),
//!     }
//! }
//!
//! let root = combine([slice("counter", counter)]);
//! let state = root
//!     .reduce(None, &Action::new("INCREMENT").with_target("counter"))
//!     .unwrap();
//! assert_eq!(state["counter"].as_i64(), Some(1));
//! ```

/// Action record, reserved kinds, and the dynamic-boundary validation.
pub mod action;

/// Reducer combinator: named slices composed into one root reducer.
pub mod combine;

/// The `Reducer` trait and reducer contract errors.
pub mod reducer;

pub use action::{Action, ActionError, INIT_KIND, WILDCARD_TARGET};
pub use combine::{combine, slice, BoxedSliceReducer, CombinedReducer, SliceMap, SliceState};
pub use reducer::{FnReducer, ReduceError, Reducer};
