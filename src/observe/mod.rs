//! Observation of committed state.
//!
//! Every machine keeps its last committed state in a [`StateCell`]. Readers
//! get cheap snapshots; subscribers are called once per commit, after the
//! new value is visible to readers.

mod subscription;

pub use subscription::{Callback, Subscribers, Subscription};

use crate::core::State;
use parking_lot::RwLock;

/// Published state snapshot plus its subscribers.
pub struct StateCell<S> {
    snapshot: RwLock<S>,
    subscribers: Subscribers<S>,
}

impl<S: State> StateCell<S> {
    pub fn new(initial: S) -> Self {
        Self {
            snapshot: RwLock::new(initial),
            subscribers: Subscribers::new(),
        }
    }

    /// Clone of the last committed state.
    pub fn get(&self) -> S {
        self.snapshot.read().clone()
    }

    /// Publish `state`, then notify subscribers with it.
    pub fn commit(&self, state: S) {
        self.publish(state.clone());
        self.notify(&state);
    }

    /// Replace the snapshot without notifying anyone.
    pub fn publish(&self, state: S) {
        *self.snapshot.write() = state;
    }

    pub fn notify(&self, state: &S) {
        self.subscribers.notify(state);
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
