//! # Uniflow Testing
//!
//! Testing utilities and helpers for uniflow stores and reducers.
//!
//! This crate provides:
//! - A fluent [`ReducerTest`] builder with Given-When-Then syntax
//! - Probes that count slice invocations and follower notifications
//! - A tracing initializer for test binaries
//!
//! ## Example
//!
//! ```
//! use uniflow_core::{Action, FnReducer, ReduceError};
//! use uniflow_testing::ReducerTest;
//!
//! let reducer = FnReducer::new(|state: Option<&i64>, action: &Action| {
//!     let count = state.copied().unwrap_or(0);
//!     Ok::<_, ReduceError>(match action.kind() {
//!         "INCREMENT" => count + 1,
//!         _ => count,
//!     })
//! });
//!
//! ReducerTest::new(reducer)
//!     .given_state(41)
//!     .when_action(Action::new("INCREMENT").with_target("counter"))
//!     .then_state(|state| assert_eq!(*state, 42))
//!     .run();
//! ```

use std::sync::Once;

mod probes;
mod reducer_test;

pub use probes::{CountingSlice, FollowerProbe};
pub use reducer_test::ReducerTest;

/// Initializes a tracing subscriber for tests and demo binaries.
///
/// Reads `RUST_LOG` via the env filter; safe to call from every test, only
/// the first call installs the subscriber.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "uniflow_runtime=debug,uniflow_core=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
