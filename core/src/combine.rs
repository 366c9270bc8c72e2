//! Reducer combinator: named slice reducers composed into one root reducer.
//!
//! [`combine`] takes an ordered mapping of slice keys to slice reducers and
//! produces a [`CombinedReducer`] whose state is a map from slice key to
//! that slice's private state. Routing follows the target convention:
//!
//! - init actions and wildcard-targeted actions are forwarded to **every**
//!   slice, in registration order
//! - any other action is forwarded to **exactly one** slice, selected by the
//!   action's target
//!
//! Slices are forwarded untargeted copies of the action; the caller's action
//! is never mutated.
//!
//! Slice states are reference counted ([`SliceState`]). Change detection is
//! by reference identity, not structural equality: a slice that hands back
//! the same `Rc` it was given reports "unchanged", while a newly allocated
//! but structurally equal value reports "changed".
//!
//! At combination time every slice is probed with an init action and with a
//! randomly named action it cannot recognize; a slice returning `None` for
//! either fails the shape check. The failure is not raised from [`combine`]
//! itself — it is captured and returned from every subsequent [`Reducer::reduce`]
//! call, permanently poisoning the combinator.

use crate::action::Action;
use crate::reducer::{ReduceError, Reducer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

/// The private state of one slice.
///
/// Reference counted so that untouched slices are shared between successive
/// state maps, and so change detection can use pointer identity.
pub type SliceState = Rc<Value>;

/// A boxed slice reducer.
///
/// Any function or closure of this shape qualifies; no trait implementation
/// is required. Returning `None` is a contract violation that the combinator
/// reports as [`ReduceError::SliceReturnedNone`].
pub type BoxedSliceReducer = Box<dyn Fn(Option<SliceState>, &Action) -> Option<SliceState>>;

/// Combined state: slice key to that slice's private state.
pub type SliceMap = BTreeMap<String, SliceState>;

/// Pairs a slice key with its reducer, for handing to [`combine`].
///
/// # Example
///
/// ```
/// use uniflow_core::{combine, slice, Action, SliceState};
/// use serde_json::json;
/// use std::rc::Rc;
///
/// let root = combine([slice("flag", |state: Option<SliceState>, _: &Action| {
///     Some(state.unwrap_or_else(|| Rc::new(json!(false))))
/// })]);
/// ```
pub fn slice(
    key: impl Into<String>,
    reducer: impl Fn(Option<SliceState>, &Action) -> Option<SliceState> + 'static,
) -> (String, BoxedSliceReducer) {
    (key.into(), Box::new(reducer))
}

/// Composes named slice reducers into one root reducer.
///
/// Registration order is preserved: broadcasts reach slices in the order the
/// pairs were supplied. The construction-time shape check runs immediately,
/// but a failure is deferred to the first dispatch (see the module docs).
#[must_use]
pub fn combine<I>(reducers: I) -> CombinedReducer
where
    I: IntoIterator<Item = (String, BoxedSliceReducer)>,
{
    let slices: Vec<(String, BoxedSliceReducer)> = reducers.into_iter().collect();
    let shape_error = shape_check(&slices).err();

    if let Some(error) = &shape_error {
        tracing::warn!(error = %error, "shape check failed; combinator is poisoned");
    }

    CombinedReducer {
        slices,
        shape_error,
    }
}

/// Probes every slice with an init action and an unrecognizable action.
///
/// A slice must produce a state from `None` in both cases, otherwise the
/// combined state map could never take shape.
fn shape_check(slices: &[(String, BoxedSliceReducer)]) -> Result<(), ReduceError> {
    for (key, reducer) in slices {
        let init = Action::init().with_target(key.clone());
        if reducer(None, &init).is_none() {
            return Err(ReduceError::ShapeCheckFailed {
                key: key.clone(),
                kind: init.kind().to_owned(),
            });
        }

        // A random kind: no real slice can special-case it, so this probes
        // the default branch.
        let unknown_kind = format!("{:016x}", rand::random::<u64>());
        let unknown = Action::new(unknown_kind.clone()).with_target(key.clone());
        if reducer(None, &unknown).is_none() {
            return Err(ReduceError::ShapeCheckFailed {
                key: key.clone(),
                kind: unknown_kind,
            });
        }
    }

    Ok(())
}

/// Root reducer produced by [`combine`].
pub struct CombinedReducer {
    slices: Vec<(String, BoxedSliceReducer)>,
    shape_error: Option<ReduceError>,
}

impl CombinedReducer {
    /// Computes the next state map and whether anything changed.
    ///
    /// Broadcasts always report changed. Targeted dispatches report changed
    /// exactly when the selected slice hands back a different `Rc` than it
    /// was given; an unchanged slice leaves its map entry (and every other
    /// key) untouched.
    ///
    /// # Errors
    ///
    /// - the captured shape-check error, on every call, if the combinator is
    ///   poisoned
    /// - [`ReduceError::TargetNotFound`] for an unknown target
    /// - [`ReduceError::SliceReturnedNone`] when a slice yields no state
    pub fn reduce_with_change(
        &self,
        state: Option<&SliceMap>,
        action: &Action,
    ) -> Result<(SliceMap, bool), ReduceError> {
        if let Some(error) = &self.shape_error {
            return Err(error.clone());
        }

        let mut next = state.cloned().unwrap_or_default();

        if action.is_broadcast() {
            let forwarded = action.untargeted();
            for (key, reducer) in &self.slices {
                let previous = next.get(key).cloned();
                let reduced = reducer(previous, &forwarded).ok_or_else(|| {
                    ReduceError::SliceReturnedNone {
                        key: key.clone(),
                        kind: forwarded.kind().to_owned(),
                    }
                })?;
                next.insert(key.clone(), reduced);
            }
            tracing::trace!(kind = forwarded.kind(), "broadcast reduced every slice");
            return Ok((next, true));
        }

        let target = action.target().unwrap_or_default();
        let Some((key, reducer)) = self.slices.iter().find(|(key, _)| key == target) else {
            return Err(ReduceError::TargetNotFound {
                target: target.to_owned(),
            });
        };

        let previous = next.get(key).cloned();
        let reduced = reducer(previous.clone(), &action.untargeted()).ok_or_else(|| {
            ReduceError::SliceReturnedNone {
                key: key.clone(),
                kind: action.kind().to_owned(),
            }
        })?;

        let changed = previous.is_none_or(|previous| !Rc::ptr_eq(&previous, &reduced));
        if changed {
            next.insert(key.clone(), reduced);
        }
        tracing::trace!(kind = action.kind(), slice = %key, changed, "targeted dispatch reduced");

        Ok((next, changed))
    }
}

impl Reducer for CombinedReducer {
    type State = SliceMap;

    fn reduce(&self, state: Option<&SliceMap>, action: &Action) -> Result<SliceMap, ReduceError> {
        self.reduce_with_change(state, action).map(|(next, _)| next)
    }
}
