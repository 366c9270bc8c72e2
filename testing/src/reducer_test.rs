//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use uniflow_core::{Action, ReduceError, Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for error assertion functions
type ErrorAssertion = Box<dyn FnOnce(&ReduceError)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// A reducer run has two outcomes — a next state or a contract error — and
/// the builder asserts on exactly one of them: use `then_state` for the
/// success path and `then_error` for the failure path.
///
/// # Example
///
/// ```ignore
/// ReducerTest::new(combine([slice("toDo", todo_reducer)]))
///     .when_action(Action::init())
///     .then_state(|state| {
///         assert!(state.contains_key("toDo"));
///     })
///     .run();
/// ```
pub struct ReducerTest<R: Reducer> {
    reducer: R,
    initial_state: Option<R::State>,
    action: Option<Action>,
    state_assertions: Vec<StateAssertion<R::State>>,
    error_assertions: Vec<ErrorAssertion>,
}

impl<R: Reducer> ReducerTest<R> {
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            error_assertions: Vec::new(),
        }
    }

    /// Set the initial state (Given)
    ///
    /// Omitting this runs the reducer against the pre-init absent state,
    /// exactly as the store's construction dispatch does.
    #[must_use]
    pub fn given_state(mut self, state: R::State) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&R::State) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting contract error (Then)
    #[must_use]
    pub fn then_error<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&ReduceError) + 'static,
    {
        self.error_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if the action is not set, if the reducer's outcome does not
    /// match the registered assertions, or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let action = self.action.expect("Action must be set with when_action()");

        match self.reducer.reduce(self.initial_state.as_ref(), &action) {
            Ok(state) => {
                assert!(
                    self.error_assertions.is_empty(),
                    "Expected a reducer error, but the reducer produced a state"
                );
                for assertion in self.state_assertions {
                    assertion(&state);
                }
            }
            Err(error) => {
                assert!(
                    self.state_assertions.is_empty(),
                    "Expected a state, but the reducer failed: {error}"
                );
                for assertion in self.error_assertions {
                    assertion(&error);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniflow_core::FnReducer;

    fn counter() -> FnReducer<i64, impl Fn(Option<&i64>, &Action) -> Result<i64, ReduceError>> {
        FnReducer::new(|state: Option<&i64>, action: &Action| {
            let count = state.copied().unwrap_or(0);
            match action.kind() {
                "INCREMENT" => Ok(count + 1),
                "EXPLODE" => Err(ReduceError::SliceReturnedNone {
                    key: "counter".to_owned(),
                    kind: action.kind().to_owned(),
                }),
                _ => Ok(count),
            }
        })
    }

    #[test]
    fn asserts_on_the_success_path() {
        ReducerTest::new(counter())
            .given_state(1)
            .when_action(Action::new("INCREMENT").with_target("counter"))
            .then_state(|state| assert_eq!(*state, 2))
            .run();
    }

    #[test]
    fn missing_given_state_runs_against_the_pre_init_state() {
        ReducerTest::new(counter())
            .when_action(Action::init())
            .then_state(|state| assert_eq!(*state, 0))
            .run();
    }

    #[test]
    fn asserts_on_the_error_path() {
        ReducerTest::new(counter())
            .given_state(1)
            .when_action(Action::new("EXPLODE").with_target("counter"))
            .then_error(|error| {
                assert!(matches!(error, ReduceError::SliceReturnedNone { .. }));
            })
            .run();
    }

    #[test]
    #[should_panic(expected = "Expected a reducer error")]
    fn mismatched_expectation_panics() {
        ReducerTest::new(counter())
            .given_state(1)
            .when_action(Action::new("INCREMENT").with_target("counter"))
            .then_error(|_| {})
            .run();
    }
}
