//! Immutable rule table with construction-time validation.
//!
//! Duplicate `(from, action)` keys are collected with `Validation` so a
//! malformed table reports every conflict at once instead of the first.

use crate::core::{Action, State};
use crate::rules::error::RuleError;
use crate::rules::rule::{Rule, TransitionType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// How a table treats several rules sharing one `(from, action)` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Refuse to build the table
    #[default]
    Reject,

    /// Keep every rule; the first one in enumeration order wins lookups
    FirstMatch,
}

/// Ordered, immutable set of legal transitions.
///
/// Cloning is cheap: clones share the underlying rules.
///
/// # Example
///
/// ```rust
/// use statecraft::rules::{Rule, RuleTable};
///
/// let table = RuleTable::new(vec![
///     Rule::new("idle", "start", "running"),
///     Rule::new("running", "stop", "idle"),
/// ])
/// .unwrap();
///
/// assert_eq!(table.lookup(&"idle", &"start").map(|r| r.to), Some("running"));
/// assert!(table.lookup(&"idle", &"stop").is_none());
/// ```
#[derive(Debug)]
pub struct RuleTable<S, A> {
    rules: Arc<[Rule<S, A>]>,
    policy: DuplicatePolicy,
}

impl<S, A> Clone for RuleTable<S, A> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            policy: self.policy,
        }
    }
}

impl<S: State, A: Action + PartialEq> RuleTable<S, A> {
    /// Build a table, rejecting duplicate keys.
    pub fn new(rules: Vec<Rule<S, A>>) -> Result<Self, RuleError> {
        Self::with_policy(rules, DuplicatePolicy::Reject)
    }

    /// Build a table with an explicit duplicate policy.
    pub fn with_policy(rules: Vec<Rule<S, A>>, policy: DuplicatePolicy) -> Result<Self, RuleError> {
        if policy == DuplicatePolicy::Reject {
            if let Validation::Failure(errors) = validate_unique(&rules) {
                return Err(RuleError::InvalidTable(errors.iter().cloned().collect()));
            }
        }

        Ok(Self {
            rules: rules.into(),
            policy,
        })
    }

    /// Build a table from every variant of a closed transition type.
    pub fn from_transitions<T>() -> Result<Self, RuleError>
    where
        T: TransitionType<State = S, Action = A>,
    {
        Self::new(T::all().iter().map(|transition| transition.rule()).collect())
    }

    /// Find the rule for `action` in `state` (pure).
    ///
    /// Returns the first matching rule in enumeration order.
    pub fn lookup(&self, state: &S, action: &A) -> Option<&Rule<S, A>> {
        self.rules.iter().find(|rule| rule.matches(state, action))
    }

    /// Distinct actions with a rule leaving `state`, in table order.
    pub fn actions_from(&self, state: &S) -> Vec<A> {
        let mut actions: Vec<A> = Vec::new();
        for rule in self.rules.iter().filter(|rule| rule.from == *state) {
            if !actions.contains(&rule.action) {
                actions.push(rule.action.clone());
            }
        }
        actions
    }

    pub fn rules(&self) -> &[Rule<S, A>] {
        &self.rules
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Check every rule against the ones before it, accumulating ALL conflicts.
fn validate_unique<S: State, A: Action + PartialEq>(
    rules: &[Rule<S, A>],
) -> Validation<(), NonEmptyVec<RuleError>> {
    let checks: Vec<Validation<(), NonEmptyVec<RuleError>>> = rules
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            match rules[..index]
                .iter()
                .position(|earlier| earlier.matches(&rule.from, &rule.action))
            {
                Some(first) => Validation::fail(RuleError::DuplicateRule {
                    from: State::name(&rule.from),
                    action: Action::name(&rule.action),
                    first,
                    duplicate: index,
                }),
                None => Validation::success(()),
            }
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}
