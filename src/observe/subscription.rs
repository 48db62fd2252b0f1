//! Subscription registry for committed-state notifications.

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Callback invoked with every newly committed state.
pub type Callback<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Registry<S> {
    next_id: AtomicU64,
    callbacks: RwLock<Vec<(u64, Callback<S>)>>,
}

trait Unsubscribe: Send + Sync {
    fn remove(&self, id: u64);
}

impl<S: 'static> Unsubscribe for Registry<S> {
    fn remove(&self, id: u64) {
        self.callbacks.write().retain(|(existing, _)| *existing != id);
    }
}

/// Ordered set of callbacks notified after each commit.
pub struct Subscribers<S> {
    registry: Arc<Registry<S>>,
}

impl<S: 'static> Subscribers<S> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(0),
                callbacks: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Register a callback. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry
            .callbacks
            .write()
            .push((id, Arc::new(callback)));

        let registry: Weak<Registry<S>> = Arc::downgrade(&self.registry);
        let registry: Weak<dyn Unsubscribe> = registry;
        Subscription {
            id,
            registry,
            active: true,
        }
    }

    /// Invoke every callback in subscription order.
    ///
    /// Callbacks are collected before any runs, so a callback may drop its
    /// own subscription without deadlocking.
    pub fn notify(&self, state: &S) {
        let callbacks: Vec<Callback<S>> = self
            .registry
            .callbacks
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(state);
        }
    }

    pub fn len(&self) -> usize {
        self.registry.callbacks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: 'static> Default for Subscribers<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a registered callback.
///
/// Dropping the handle unsubscribes. Use [`Subscription::detach`] to keep
/// the callback for the machine's whole lifetime.
#[must_use = "dropping a Subscription immediately unsubscribes its callback"]
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Unsubscribe>,
    active: bool,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the callback and release its reference.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Keep the callback registered after this handle is gone.
    pub fn detach(mut self) {
        self.active = false;
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}
