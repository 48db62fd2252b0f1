//! Transition history tracking.
//!
//! The transition engine records every committed transition so callers can
//! inspect the path a machine took. Histories live in memory only.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What happened to a rule's side effect during a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    /// The rule carries no effect
    Skipped,
    /// The effect ran to completion
    Succeeded,
    /// The effect failed; the transition committed anyway
    Failed(String),
}

impl EffectOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{EffectOutcome, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "idle",
///     action: "Play".to_string(),
///     to: "playing",
///     timestamp: Utc::now(),
///     effect: EffectOutcome::Skipped,
/// };
/// assert_eq!(record.to, "playing");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    /// The state being transitioned from
    pub from: S,
    /// Debug rendering of the action that triggered the transition
    pub action: String,
    /// The state being transitioned to
    pub to: S,
    /// When the transition committed
    pub timestamp: DateTime<Utc>,
    /// Outcome of the rule's effect
    pub effect: EffectOutcome,
}

/// Ordered history of committed transitions.
///
/// `record` is pure: it returns a new history with the transition added.
/// The engine itself appends in place through a bounded push.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{EffectOutcome, StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(TransitionRecord {
///         from: "idle",
///         action: "start".into(),
///         to: "running",
///         timestamp: Utc::now(),
///         effect: EffectOutcome::Skipped,
///     })
///     .record(TransitionRecord {
///         from: "running",
///         action: "stop".into(),
///         to: "stopped",
///         timestamp: Utc::now(),
///         effect: EffectOutcome::Succeeded,
///     });
///
/// assert_eq!(history.get_path(), vec![&"idle", &"running", &"stopped"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<S> {
    transitions: Vec<TransitionRecord<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: TransitionRecord<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append in place, dropping the oldest records beyond `limit`.
    pub(crate) fn push(&mut self, transition: TransitionRecord<S>, limit: Option<usize>) {
        self.transitions.push(transition);
        if let Some(limit) = limit {
            let excess = self.transitions.len().saturating_sub(limit);
            if excess > 0 {
                self.transitions.drain(..excess);
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition followed
    /// by the `to` state of every transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last retained transitions.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of transitions whose effect failed.
    pub fn effect_failures(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| t.effect.is_failure())
            .count()
    }

    pub fn transitions(&self) -> &[TransitionRecord<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    fn record(from: TestState, to: TestState) -> TransitionRecord<TestState> {
        TransitionRecord {
            from,
            action: "Advance".to_string(),
            to,
            timestamp: Utc::now(),
            effect: EffectOutcome::Skipped,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(record(TestState::Initial, TestState::Processing));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(record(TestState::Initial, TestState::Processing))
            .record(record(TestState::Processing, TestState::Complete));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Initial);
        assert_eq!(path[1], &TestState::Processing);
        assert_eq!(path[2], &TestState::Complete);
    }

    #[test]
    fn push_respects_limit() {
        let mut history = StateHistory::new();
        history.push(record(TestState::Initial, TestState::Processing), Some(2));
        history.push(record(TestState::Processing, TestState::Complete), Some(2));
        history.push(record(TestState::Complete, TestState::Initial), Some(2));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![
                &TestState::Processing,
                &TestState::Complete,
                &TestState::Initial
            ]
        );
    }

    #[test]
    fn push_without_limit_keeps_everything() {
        let mut history = StateHistory::new();
        for _ in 0..50 {
            history.push(record(TestState::Initial, TestState::Processing), None);
        }
        assert_eq!(history.len(), 50);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = StateHistory::new().record(record(TestState::Initial, TestState::Processing));

        std::thread::sleep(Duration::from_millis(10));

        let history = history.record(record(TestState::Processing, TestState::Complete));

        let duration = history.duration().unwrap();
        assert!(duration >= Duration::from_millis(10));
    }

    #[test]
    fn effect_failures_are_counted() {
        let mut failed = record(TestState::Initial, TestState::Processing);
        failed.effect = EffectOutcome::Failed("boom".to_string());

        let history = StateHistory::new()
            .record(failed)
            .record(record(TestState::Processing, TestState::Complete));

        assert_eq!(history.effect_failures(), 1);
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(record(TestState::Initial, TestState::Processing));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(history.transitions(), deserialized.transitions());
    }
}
