//! Probes for observing slice invocations and follower notifications.

use std::cell::Cell;
use std::rc::Rc;
use uniflow_core::{Action, SliceState};

/// Wraps a slice reducer and counts how often it is invoked.
///
/// The count includes the combinator's construction-time shape probes; call
/// [`CountingSlice::reset`] after `combine` (or after the init dispatch) to
/// measure a single dispatch in isolation.
///
/// # Example
///
/// ```
/// use uniflow_core::{combine, slice, Action, Reducer, SliceState};
/// use uniflow_testing::CountingSlice;
/// use serde_json::json;
/// use std::rc::Rc;
///
/// let probe = CountingSlice::new();
/// let root = combine([slice(
///     "a",
///     probe.wrap(|state: Option<SliceState>, _: &Action| {
///         Some(state.unwrap_or_else(|| Rc::new(json!(null))))
///     }),
/// )]);
///
/// probe.reset();
/// root.reduce(None, &Action::init()).unwrap();
/// assert_eq!(probe.calls(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CountingSlice {
    calls: Rc<Cell<usize>>,
}

impl CountingSlice {
    /// Creates a probe with a zero call count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a slice reducer so every invocation bumps this probe's count.
    pub fn wrap(
        &self,
        reducer: impl Fn(Option<SliceState>, &Action) -> Option<SliceState> + 'static,
    ) -> impl Fn(Option<SliceState>, &Action) -> Option<SliceState> + 'static {
        let calls = Rc::clone(&self.calls);
        move |state, action| {
            calls.set(calls.get() + 1);
            reducer(state, action)
        }
    }

    /// Number of invocations observed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Resets the count to zero.
    pub fn reset(&self) {
        self.calls.set(0);
    }
}

/// Counts follower notifications.
///
/// # Example
///
/// ```ignore
/// let probe = FollowerProbe::new();
/// let unfollow = store.follow(probe.callback());
/// store.dispatch(action)?;
/// assert_eq!(probe.notifications(), 1);
/// ```
#[derive(Clone, Default)]
pub struct FollowerProbe {
    notifications: Rc<Cell<usize>>,
}

impl FollowerProbe {
    /// Creates a probe with a zero notification count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The zero-argument callback to hand to `Store::follow`.
    #[must_use]
    pub fn callback(&self) -> impl Fn() + 'static {
        let notifications = Rc::clone(&self.notifications);
        move || notifications.set(notifications.get() + 1)
    }

    /// Number of notifications observed so far.
    #[must_use]
    pub fn notifications(&self) -> usize {
        self.notifications.get()
    }

    /// Resets the count to zero.
    pub fn reset(&self) {
        self.notifications.set(0);
    }
}
