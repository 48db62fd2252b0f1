//! Deterministic stand-ins for tests.
//!
//! [`MockMachine`] has the same dispatch contract as
//! [`ReducerMachine`](crate::reducer::ReducerMachine) but applies each
//! action synchronously, so tests can assert on state and on the exact
//! action sequence without waiting.

use crate::core::{Action, State};
use crate::machine::{DispatchResult, Machine};
use crate::observe::{StateCell, Subscription};
use parking_lot::Mutex;
use std::fmt;

/// Type alias for in-place synchronous reducers.
type MockReducer<S, A> = Box<dyn Fn(&mut S, A) + Send + Sync>;

/// Synchronous machine that records every action it receives.
///
/// # Example
///
/// ```rust
/// use statecraft::testing::MockMachine;
///
/// let mock = MockMachine::with_reducer("idle", |state: &mut &'static str, action: &'static str| {
///     if action == "start" {
///         *state = "running";
///     }
/// });
///
/// mock.dispatch("start");
///
/// assert_eq!(mock.state(), "running");
/// assert_eq!(mock.received_actions(), vec!["start"]);
/// ```
pub struct MockMachine<S, A> {
    cell: StateCell<S>,
    received: Mutex<Vec<A>>,
    reducer: Option<MockReducer<S, A>>,
}

impl<S: State, A: Action> MockMachine<S, A> {
    /// Mock without a reducer: the state never changes.
    pub fn new(initial: S) -> Self {
        Self {
            cell: StateCell::new(initial),
            received: Mutex::new(Vec::new()),
            reducer: None,
        }
    }

    pub fn with_reducer<F>(initial: S, reducer: F) -> Self
    where
        F: Fn(&mut S, A) + Send + Sync + 'static,
    {
        Self {
            reducer: Some(Box::new(reducer)),
            ..Self::new(initial)
        }
    }

    /// Record `action`, apply the reducer and commit, all before returning.
    ///
    /// Concurrent dispatches are serialized: the action log lock is held
    /// until the commit and subscriber notification finish, so subscribers
    /// must not dispatch back into the same mock.
    pub fn dispatch(&self, action: A) {
        let mut received = self.received.lock();
        received.push(action.clone());
        let mut next = self.cell.get();
        if let Some(reducer) = &self.reducer {
            reducer(&mut next, action);
        }
        self.cell.commit(next);
    }

    pub fn state(&self) -> S {
        self.cell.get()
    }

    /// Every action dispatched so far, in dispatch order.
    pub fn received_actions(&self) -> Vec<A> {
        self.received.lock().clone()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.cell.subscribe(callback)
    }
}

impl<S: State, A: Action> Machine for MockMachine<S, A> {
    type State = S;
    type Action = A;

    fn state(&self) -> S {
        MockMachine::state(self)
    }

    fn dispatch(&self, action: A) -> DispatchResult<()> {
        MockMachine::dispatch(self, action);
        Ok(())
    }
}

impl<S: State, A: Action> fmt::Debug for MockMachine<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockMachine")
            .field("state", &self.cell.get())
            .field("received", &*self.received.lock())
            .field("has_reducer", &self.reducer.is_some())
            .finish()
    }
}
