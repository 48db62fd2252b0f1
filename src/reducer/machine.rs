//! Reducer machine: a mailbox drained by one worker task.

use crate::config::MachineConfig;
use crate::core::{Action, State};
use crate::machine::{DispatchError, DispatchResult, Machine, StartError};
use crate::observe::{StateCell, Subscription};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

/// Type alias for reducers.
/// A reducer maps the current state and an action to the next state.
pub type Reducer<S, A> = Arc<dyn Fn(S, A) -> BoxFuture<'static, S> + Send + Sync>;

enum Command<A> {
    Apply(A),
    Settle(oneshot::Sender<()>),
}

/// State machine whose next state is computed by an arbitrary reducer.
///
/// `dispatch` never waits: it appends the action to an ordered mailbox.
/// A single worker task applies actions one at a time, so reducer calls
/// never interleave and each one sees the state committed by the previous
/// one. Reads are eventually consistent; await [`settled`](Self::settled)
/// to wait for everything dispatched so far.
///
/// Dropping the machine closes the mailbox; the worker finishes the queued
/// actions and exits.
///
/// # Example
///
/// ```rust
/// use statecraft::ReducerMachine;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let machine = ReducerMachine::from_fn("idle", |state, action: &'static str| {
///     if state == "idle" && action == "start" { "running" } else { state }
/// })
/// .unwrap();
///
/// machine.dispatch("start").unwrap();
/// machine.settled().await.unwrap();
/// assert_eq!(machine.state(), "running");
/// # });
/// ```
pub struct ReducerMachine<S, A> {
    id: Uuid,
    label: String,
    cell: Arc<StateCell<S>>,
    mailbox: mpsc::UnboundedSender<Command<A>>,
}

impl<S: State, A: Action> ReducerMachine<S, A> {
    /// Create a machine driven by an async reducer.
    ///
    /// The worker task is spawned immediately, so this fails with
    /// [`StartError::NoRuntime`] outside a Tokio runtime.
    pub fn new<F, Fut>(initial: S, reducer: F) -> Result<Self, StartError>
    where
        F: Fn(S, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = S> + Send + 'static,
    {
        Self::with_config(initial, reducer, MachineConfig::default())
    }

    /// Create a machine driven by a synchronous reducer.
    pub fn from_fn<F>(initial: S, reducer: F) -> Result<Self, StartError>
    where
        F: Fn(S, A) -> S + Send + Sync + 'static,
    {
        Self::new(initial, move |state, action| {
            futures::future::ready(reducer(state, action))
        })
    }

    pub fn with_config<F, Fut>(
        initial: S,
        reducer: F,
        config: MachineConfig,
    ) -> Result<Self, StartError>
    where
        F: Fn(S, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = S> + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| StartError::NoRuntime {
            label: config.label.clone(),
        })?;
        let id = Uuid::new_v4();
        let cell = Arc::new(StateCell::new(initial));
        let reducer: Reducer<S, A> =
            Arc::new(move |state: S, action: A| reducer(state, action).boxed());
        let (mailbox, inbox) = mpsc::unbounded_channel();

        let span = info_span!("reducer_machine", machine = %config.label, machine_id = %id);
        runtime.spawn(run_worker(Arc::clone(&cell), reducer, inbox).instrument(span));

        Ok(Self {
            id,
            label: config.label,
            cell,
            mailbox,
        })
    }

    /// Last committed state; never an intermediate value.
    pub fn state(&self) -> S {
        self.cell.get()
    }

    /// Enqueue `action` without waiting for it to be applied.
    ///
    /// Fails only if the worker has stopped, e.g. because the reducer
    /// panicked.
    pub fn dispatch(&self, action: A) -> DispatchResult<()> {
        debug!(
            machine = %self.label,
            machine_id = %self.id,
            action = ?action,
            "Enqueued action"
        );
        self.mailbox
            .send(Command::Apply(action))
            .map_err(|_| self.stopped())
    }

    /// Wait until every action dispatched before this call is committed.
    pub async fn settled(&self) -> DispatchResult<()> {
        let (done, wait) = oneshot::channel();
        self.mailbox
            .send(Command::Settle(done))
            .map_err(|_| self.stopped())?;
        wait.await.map_err(|_| self.stopped())
    }

    /// Register a callback for every committed state.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.cell.subscribe(callback)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn stopped(&self) -> DispatchError {
        warn!(machine = %self.label, machine_id = %self.id, "Reducer worker has stopped");
        DispatchError::Stopped {
            label: self.label.clone(),
        }
    }
}

impl<S: State, A: Action> Machine for ReducerMachine<S, A> {
    type State = S;
    type Action = A;

    fn state(&self) -> S {
        ReducerMachine::state(self)
    }

    fn dispatch(&self, action: A) -> DispatchResult<()> {
        ReducerMachine::dispatch(self, action)
    }
}

async fn run_worker<S: State, A: Action>(
    cell: Arc<StateCell<S>>,
    reducer: Reducer<S, A>,
    mut inbox: mpsc::UnboundedReceiver<Command<A>>,
) {
    while let Some(command) = inbox.recv().await {
        match command {
            Command::Apply(action) => {
                let action_name = format!("{action:?}");
                let next = reducer(cell.get(), action).await;
                debug!(action = %action_name, state = ?next, "Committed reduced state");
                cell.commit(next);
            }
            Command::Settle(done) => {
                // The waiter may have given up; nothing to report then.
                let _ = done.send(());
            }
        }
    }
    debug!("Mailbox closed, reducer worker exiting");
}
