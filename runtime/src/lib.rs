//! # Uniflow Runtime
//!
//! Runtime for the uniflow unidirectional state container.
//!
//! This crate provides the [`Store`]: the single owner of the current state
//! snapshot and of the dispatch/follow protocol.
//!
//! ## Core Components
//!
//! - **Store**: holds one state value, runs the root reducer on every
//!   dispatched action, and notifies followers after every dispatch
//! - **Unfollow**: the handle returned by [`Store::follow`]; removes the
//!   registered follower on demand
//!
//! ## Concurrency Model
//!
//! Single-threaded, synchronous, cooperative. The only hazard is logical
//! reentrancy — a reducer or follower dispatching while a dispatch is still
//! in flight — and it is enforced with an explicit phase flag, not a lock.
//! The store handle is deliberately `!Send`.
//!
//! ## Example
//!
//! ```
//! use uniflow_core::{combine, slice, Action, SliceState};
//! use uniflow_runtime::Store;
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! fn counter(state: Option<SliceState>, action: &Action) -> Option<SliceState> {
//!     let count = state.as_deref().and_then(|v| v.as_i64()).unwrap_or(0);
//!     match action.kind() {
//!         "INCREMENT" => Some(Rc::new(json!(count + 1))),
//!         _ => Some(state.unwrap_or_else(|| Rc::new(json!(0)))),
//!     }
//! }
//!
//! let store = Store::new(combine([slice("counter", counter)]), None).unwrap();
//! store.dispatch(Action::new("INCREMENT").with_target("counter")).unwrap();
//! let count = store.state(|s| s["counter"].as_i64()).unwrap();
//! assert_eq!(count, Some(1));
//! ```

/// The store: state ownership, dispatch, and follower broadcast.
pub mod store;

/// Error types for the store runtime.
pub mod error {
    use thiserror::Error;
    use uniflow_core::{ActionError, ReduceError};

    /// Errors that can occur during store operations.
    ///
    /// Action-shape violations keep their named kinds from the core crate;
    /// the two concurrency violations are distinct variants of this enum.
    /// Nothing is retried internally — every error propagates to the caller.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// A dispatched value failed action-shape validation.
        #[error(transparent)]
        InvalidAction(#[from] ActionError),

        /// The reducer reported a contract violation. Followers were still
        /// notified before this error was returned.
        #[error(transparent)]
        Reduce(#[from] ReduceError),

        /// `dispatch` was called while another dispatch (including its
        /// follower broadcast) was still in flight.
        #[error("cannot dispatch while another dispatch is in flight")]
        AlreadyDispatching,

        /// State was read while the reducer was still running. Followers
        /// read state from the post-dispatch broadcast instead.
        #[error("state is being updated; read it after the dispatch broadcast")]
        StateBusy,
    }
}

pub use error::StoreError;
pub use store::{Store, Unfollow};
