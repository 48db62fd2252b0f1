//! The synchronous dispatch contract shared by observable machines.

mod error;

pub use error::{DispatchError, DispatchResult, StartError};

use crate::core::{Action, State};

/// A machine that accepts actions without making the caller wait.
///
/// Implemented by [`ReducerMachine`](crate::reducer::ReducerMachine), whose
/// dispatch only enqueues, and by [`MockMachine`](crate::testing::MockMachine),
/// whose dispatch applies immediately. Code written against this trait can
/// be exercised with the mock in tests.
pub trait Machine {
    type State: State;
    type Action: Action;

    /// Last committed state.
    fn state(&self) -> Self::State;

    /// Submit one action for processing.
    fn dispatch(&self, action: Self::Action) -> DispatchResult<()>;
}
