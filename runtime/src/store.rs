//! The store: single owner of state and of the dispatch/follow protocol.

use crate::error::StoreError;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use uniflow_core::{Action, ActionError, Reducer};

/// Where the store currently is in its dispatch/read cycle.
///
/// `Reducing` rejects both dispatches and state reads; `Broadcasting` still
/// rejects dispatches (a follower must not re-enter the store) but allows
/// state reads, so followers observe the fully-settled snapshot. `Reading`
/// covers the span of a `state()` closure: the state borrow is live there,
/// so dispatches are rejected, while nested reads remain fine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Reading,
    Reducing,
    Broadcasting,
}

/// Restores the saved phase when dropped, so a read window closes even if
/// the read closure unwinds.
struct PhaseGuard<'a> {
    phase: &'a Cell<Phase>,
    previous: Phase,
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.phase.set(self.previous);
    }
}

type FollowerFn = Rc<dyn Fn()>;

struct StoreInner<R: Reducer> {
    reducer: R,
    state: RefCell<R::State>,
    followers: RefCell<Vec<FollowerFn>>,
    phase: Cell<Phase>,
}

/// The store: owns the current state snapshot, runs the root reducer on
/// every dispatched action, and notifies followers after every dispatch.
///
/// The handle is cheap to clone; clones share the same state, reducer, and
/// follower registry. Pass clones into followers or UI glue instead of
/// keeping a global instance.
///
/// # Example
///
/// ```
/// use uniflow_core::{Action, FnReducer, ReduceError};
/// use uniflow_runtime::Store;
///
/// let reducer = FnReducer::new(|state: Option<&i64>, action: &Action| {
///     let count = state.copied().unwrap_or(0);
///     Ok::<_, ReduceError>(match action.kind() {
///         "INCREMENT" => count + 1,
///         _ => count,
///     })
/// });
///
/// let store = Store::new(reducer, None).unwrap();
/// store.dispatch(Action::new("INCREMENT").with_target("counter")).unwrap();
/// assert_eq!(store.state_cloned(), Ok(1));
/// ```
pub struct Store<R: Reducer> {
    inner: Rc<StoreInner<R>>,
}

impl<R: Reducer> Store<R> {
    /// Creates a store and runs the one initialization dispatch.
    ///
    /// The reducer sees `initial_state` (possibly absent) together with the
    /// reserved init action before the handle is returned, so the store
    /// never exposes the raw initial-state argument: the first observable
    /// state is already reducer-defined.
    ///
    /// # Errors
    ///
    /// Returns the init dispatch's [`StoreError::Reduce`] if the reducer
    /// rejects the initialization action — for a combined reducer this is
    /// where a failed shape check first surfaces.
    pub fn new(reducer: R, initial_state: Option<R::State>) -> Result<Self, StoreError> {
        let init = Action::init();
        let state = reducer.reduce(initial_state.as_ref(), &init)?;
        tracing::debug!("store initialized");

        Ok(Self {
            inner: Rc::new(StoreInner {
                reducer,
                state: RefCell::new(state),
                followers: RefCell::new(Vec::new()),
                phase: Cell::new(Phase::Idle),
            }),
        })
    }

    /// Dispatches an action through the root reducer.
    ///
    /// On success the stored state is replaced with the reducer's result.
    /// On every exit path — success or reducer error — all followers are
    /// notified, in registration order, before this method returns; a
    /// failed dispatch leaves the previous state in place, so followers
    /// must re-read state rather than assume it changed.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidAction`] if a non-init action has no target
    /// - [`StoreError::AlreadyDispatching`] on reentrant dispatch: from a
    ///   reducer, from a follower during the broadcast, or from inside a
    ///   [`state`](Store::state) read closure
    /// - [`StoreError::Reduce`] when the reducer reports a contract
    ///   violation (returned after the broadcast completes)
    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        if !action.is_init() && action.target().is_none() {
            return Err(ActionError::MissingTarget.into());
        }

        if self.inner.phase.get() != Phase::Idle {
            tracing::warn!(
                kind = action.kind(),
                "rejected reentrant dispatch while a dispatch is in flight"
            );
            metrics::counter!("store.dispatch.rejected").increment(1);
            return Err(StoreError::AlreadyDispatching);
        }

        tracing::debug!(
            kind = action.kind(),
            action_target = action.target(),
            "dispatching action"
        );
        metrics::counter!("store.dispatch.total").increment(1);

        self.inner.phase.set(Phase::Reducing);
        let broadcast = BroadcastGuard { inner: &self.inner };

        let reduced = {
            let start = std::time::Instant::now();
            let current = self.inner.state.borrow();
            let reduced = self.inner.reducer.reduce(Some(&current), &action);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());
            reduced
        };

        let result = match reduced {
            Ok(next) => {
                *self.inner.state.borrow_mut() = next;
                Ok(())
            }
            Err(error) => {
                metrics::counter!("store.dispatch.errors").increment(1);
                tracing::warn!(error = %error, "reducer failed; followers are still notified");
                Err(StoreError::Reduce(error))
            }
        };

        // Broadcast runs here, then the phase returns to Idle; only after
        // that does a reducer error reach the caller.
        drop(broadcast);
        result
    }

    /// Validates a raw JSON value as an action and dispatches it.
    ///
    /// This is the dynamic boundary: values arriving as loose records (from
    /// a REPL, a test fixture, a script) get the full shape validation —
    /// not-a-record, missing type, missing target — before entering the
    /// reducer.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidAction`] for shape violations, otherwise as
    /// [`Store::dispatch`].
    pub fn dispatch_value(&self, value: Value) -> Result<(), StoreError> {
        let action = Action::from_value(value)?;
        self.dispatch(action)
    }

    /// Reads the current state through a closure.
    ///
    /// The closure receives a reference to the store's own snapshot — no
    /// defensive copy is taken. The state borrow is live for the closure's
    /// whole span, so a dispatch from inside it is rejected with
    /// [`StoreError::AlreadyDispatching`]; nested reads are fine.
    ///
    /// # Errors
    ///
    /// [`StoreError::StateBusy`] while the reducer is running. Reads from
    /// followers during the post-dispatch broadcast succeed.
    pub fn state<T>(&self, read: impl FnOnce(&R::State) -> T) -> Result<T, StoreError> {
        if self.inner.phase.get() == Phase::Reducing {
            return Err(StoreError::StateBusy);
        }

        let restore = PhaseGuard {
            phase: &self.inner.phase,
            previous: self.inner.phase.replace(Phase::Reading),
        };
        let value = read(&self.inner.state.borrow());
        drop(restore);
        Ok(value)
    }

    /// Clones the current state out of the store.
    ///
    /// # Errors
    ///
    /// [`StoreError::StateBusy`] while the reducer is running.
    pub fn state_cloned(&self) -> Result<R::State, StoreError>
    where
        R::State: Clone,
    {
        self.state(Clone::clone)
    }

    /// Registers a follower: a zero-argument callback invoked after every
    /// dispatch, in registration order. The same callback may be registered
    /// more than once; each registration is notified separately.
    ///
    /// The returned [`Unfollow`] handle removes exactly this registration.
    #[must_use]
    pub fn follow(&self, follower: impl Fn() + 'static) -> Unfollow<R> {
        let follower: FollowerFn = Rc::new(follower);
        self.inner.followers.borrow_mut().push(Rc::clone(&follower));

        Unfollow {
            store: Rc::downgrade(&self.inner),
            follower: Rc::downgrade(&follower),
        }
    }

    /// Number of currently registered followers.
    #[must_use]
    pub fn follower_count(&self) -> usize {
        self.inner.followers.borrow().len()
    }
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Notifies every follower when dropped, then returns the store to idle.
///
/// Living in a drop guard makes the broadcast unconditional: it runs on the
/// success path, on the reducer-error path, and during unwinding alike.
struct BroadcastGuard<'a, R: Reducer> {
    inner: &'a StoreInner<R>,
}

impl<R: Reducer> Drop for BroadcastGuard<'_, R> {
    fn drop(&mut self) {
        self.inner.phase.set(Phase::Broadcasting);

        // Snapshot the registry so followers can unfollow (or follow) while
        // the broadcast is running.
        let followers: Vec<FollowerFn> = self.inner.followers.borrow().clone();
        tracing::trace!(count = followers.len(), "notifying followers");
        for follower in &followers {
            (**follower)();
        }
        metrics::counter!("store.followers.notified")
            .increment(u64::try_from(followers.len()).unwrap_or(u64::MAX));

        self.inner.phase.set(Phase::Idle);
    }
}

/// Handle returned by [`Store::follow`].
///
/// Removes the matching registration — by identity, first match only — when
/// [`unfollow`](Unfollow::unfollow) is called. Calling it again, or after
/// the store is gone, is a no-op.
pub struct Unfollow<R: Reducer> {
    store: Weak<StoreInner<R>>,
    follower: Weak<dyn Fn()>,
}

impl<R: Reducer> Unfollow<R> {
    /// Removes the registered follower from the store.
    pub fn unfollow(&self) {
        let (Some(store), Some(follower)) = (self.store.upgrade(), self.follower.upgrade())
        else {
            return;
        };

        let mut followers = store.followers.borrow_mut();
        if let Some(index) = followers.iter().position(|f| Rc::ptr_eq(f, &follower)) {
            followers.remove(index);
        }
    }
}
