//! The `Reducer` trait and reducer contract errors.

use crate::action::Action;
use std::marker::PhantomData;
use thiserror::Error;

/// Violations of the reducer contract, surfaced out of a dispatch.
///
/// `Clone` matters here: a combinator that fails its construction-time shape
/// check keeps the captured error and returns it from every later dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReduceError {
    /// A targeted action named a slice that the combinator does not know.
    #[error("target {target} not found in reducers")]
    TargetNotFound {
        /// The unknown routing target.
        target: String,
    },

    /// A slice reducer returned no state for a dispatched action.
    #[error("reducer for key {key} returned no state for action type {kind}")]
    SliceReturnedNone {
        /// Key of the offending slice.
        key: String,
        /// Kind of the action being reduced.
        kind: String,
    },

    /// A slice reducer returned no state during the construction-time shape
    /// check. Captured once at combination time and returned from every
    /// subsequent dispatch.
    #[error("reducer for key {key} returned no state during the shape check for action type {kind}")]
    ShapeCheckFailed {
        /// Key of the offending slice.
        key: String,
        /// Kind of the probe action.
        kind: String,
    },
}

/// The root reducer abstraction consumed by the store.
///
/// A reducer is a pure function from the previous state and an action to the
/// next state. `None` for the previous state models the one moment before
/// the store's initialization dispatch has produced a state; a reducer must
/// always produce a state from it.
///
/// # Example
///
/// ```
/// use uniflow_core::{Action, ReduceError, Reducer};
///
/// struct Counter;
///
/// impl Reducer for Counter {
///     type State = i64;
///
///     fn reduce(&self, state: Option<&i64>, action: &Action) -> Result<i64, ReduceError> {
///         let count = state.copied().unwrap_or(0);
///         Ok(match action.kind() {
///             "INCREMENT" => count + 1,
///             _ => count,
///         })
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer produces.
    type State;

    /// Computes the next state from the previous state and an action.
    ///
    /// # Errors
    ///
    /// Returns a [`ReduceError`] when the reducer contract is violated; the
    /// store propagates it to the dispatch caller after notifying followers.
    fn reduce(&self, state: Option<&Self::State>, action: &Action)
    -> Result<Self::State, ReduceError>;
}

/// Adapter that lets any closure of the reducer shape act as a [`Reducer`].
///
/// # Example
///
/// ```
/// use uniflow_core::{Action, FnReducer, Reducer};
///
/// let doubler = FnReducer::new(|state: Option<&i64>, _action: &Action| {
///     Ok(state.copied().unwrap_or(1) * 2)
/// });
/// assert_eq!(doubler.reduce(Some(&3), &Action::init()), Ok(6));
/// ```
pub struct FnReducer<S, F> {
    reduce: F,
    _state: PhantomData<fn() -> S>,
}

impl<S, F> FnReducer<S, F>
where
    F: Fn(Option<&S>, &Action) -> Result<S, ReduceError>,
{
    /// Wraps a closure as a reducer.
    pub const fn new(reduce: F) -> Self {
        Self {
            reduce,
            _state: PhantomData,
        }
    }
}

impl<S, F> Reducer for FnReducer<S, F>
where
    F: Fn(Option<&S>, &Action) -> Result<S, ReduceError>,
{
    type State = S;

    fn reduce(&self, state: Option<&S>, action: &Action) -> Result<S, ReduceError> {
        (self.reduce)(state, action)
    }
}
