//! Table-driven transition engine.

use crate::config::MachineConfig;
use crate::core::{Action, EffectOutcome, State, StateHistory, TransitionRecord};
use crate::machine::{DispatchError, DispatchResult};
use crate::observe::{StateCell, Subscription};
use crate::rules::{RuleError, RuleTable, TransitionType};
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

/// Callback invoked with the initial state and after every commit.
pub type Hook<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Wrap a closure as a [`Hook`].
pub fn hook<S, F>(callback: F) -> Hook<S>
where
    F: Fn(&S) + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// Result of a successful dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatched<S> {
    pub from: S,
    pub to: S,
    pub effect: EffectOutcome,
}

/// State machine that only moves along an enumerated set of rules.
///
/// Each dispatch holds the engine's processing lock for its whole run:
/// rule lookup, effect, commit, hook and subscriber notification. Two
/// dispatches therefore never interleave, and once `dispatch(..).await`
/// returns the new state is visible to every reader.
///
/// Effect failures are logged and recorded but never block the commit.
/// Actions without a matching rule leave the state untouched and return
/// [`DispatchError::InvalidTransition`].
///
/// Hooks and subscribers run while the processing lock is held and must
/// not await `dispatch` on the same engine.
pub struct TransitionEngine<S, A> {
    id: Uuid,
    config: MachineConfig,
    table: RuleTable<S, A>,
    hook: Option<Hook<S>>,
    current: Mutex<S>,
    cell: StateCell<S>,
    history: RwLock<StateHistory<S>>,
}

impl<S: State, A: Action + PartialEq> TransitionEngine<S, A> {
    /// Create an engine. `hook` is invoked with `initial` before this
    /// returns.
    pub fn new(initial: S, table: RuleTable<S, A>, hook: Option<Hook<S>>) -> Self {
        Self::with_config(initial, table, hook, MachineConfig::default())
    }

    pub fn with_config(
        initial: S,
        table: RuleTable<S, A>,
        hook: Option<Hook<S>>,
        config: MachineConfig,
    ) -> Self {
        let id = Uuid::new_v4();
        debug!(
            machine = %config.label,
            machine_id = %id,
            rules = table.len(),
            initial = ?initial,
            "Created transition engine"
        );

        if let Some(hook) = &hook {
            hook(&initial);
        }

        Self {
            id,
            config,
            table,
            hook,
            current: Mutex::new(initial.clone()),
            cell: StateCell::new(initial),
            history: RwLock::new(StateHistory::new()),
        }
    }

    /// Create an engine from every variant of a closed transition type.
    ///
    /// Fails if two variants share a `(from, action)` key.
    pub fn for_transitions<T>(initial: S, hook: Option<Hook<S>>) -> Result<Self, RuleError>
    where
        T: TransitionType<State = S, Action = A>,
    {
        Ok(Self::new(initial, RuleTable::from_transitions::<T>()?, hook))
    }

    /// Last committed state.
    pub fn state(&self) -> S {
        self.cell.get()
    }

    /// Apply `action` to the current state.
    ///
    /// Completes only after the transition is committed and observers have
    /// been notified.
    pub async fn dispatch(&self, action: A) -> DispatchResult<Dispatched<S>> {
        let span = info_span!(
            "dispatch",
            machine = %self.config.label,
            machine_id = %self.id,
            action = ?action,
        );
        self.process(action).instrument(span).await
    }

    async fn process(&self, action: A) -> DispatchResult<Dispatched<S>> {
        let mut current = self.current.lock().await;

        let Some(rule) = self.table.lookup(&current, &action) else {
            warn!(state = ?*current, "Invalid transition: no rule matches");
            return Err(DispatchError::InvalidTransition {
                state: State::name(&*current),
                action: Action::name(&action),
            });
        };

        let effect = match &rule.effect {
            None => EffectOutcome::Skipped,
            Some(effect) => match effect.run().await {
                Ok(()) => EffectOutcome::Succeeded,
                Err(err) => {
                    error!(
                        error = %err,
                        from = ?rule.from,
                        to = ?rule.to,
                        "Effect failed, committing transition anyway"
                    );
                    EffectOutcome::Failed(err.to_string())
                }
            },
        };

        let from = std::mem::replace(&mut *current, rule.to.clone());
        // Publish before recording: a history entry never runs ahead of state().
        self.cell.publish(rule.to.clone());
        if self.config.record_history {
            self.history.write().push(
                TransitionRecord {
                    from: from.clone(),
                    action: Action::name(&action),
                    to: rule.to.clone(),
                    timestamp: Utc::now(),
                    effect: effect.clone(),
                },
                self.config.history_limit,
            );
        }

        if let Some(hook) = &self.hook {
            hook(&rule.to);
        }
        self.cell.notify(&rule.to);

        debug!(from = ?from, to = ?rule.to, "Committed transition");
        Ok(Dispatched {
            from,
            to: rule.to.clone(),
            effect,
        })
    }

    /// Whether `action` has a rule from the current state (pure).
    pub fn can_dispatch(&self, action: &A) -> bool {
        self.table.lookup(&self.cell.get(), action).is_some()
    }

    /// Actions with a rule from the current state, in table order.
    pub fn available_actions(&self) -> Vec<A> {
        self.table.actions_from(&self.cell.get())
    }

    /// Snapshot of committed transitions.
    pub fn history(&self) -> StateHistory<S> {
        self.history.read().clone()
    }

    /// Register a callback for every committed state.
    ///
    /// Unlike the hook, subscribers are not called with the initial state.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.cell.subscribe(callback)
    }

    pub fn table(&self) -> &RuleTable<S, A> {
        &self.table
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }
}
