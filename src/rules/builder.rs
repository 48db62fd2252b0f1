//! Fluent builders for rules and rule tables.

use crate::core::{Action, State};
use crate::rules::effect::Effect;
use crate::rules::error::{EffectError, RuleError};
use crate::rules::rule::Rule;
use crate::rules::table::{DuplicatePolicy, RuleTable};
use std::future::Future;

/// Builder for constructing rules with a fluent API.
pub struct RuleBuilder<S, A> {
    from: Option<S>,
    action: Option<A>,
    to: Option<S>,
    effect: Option<Effect>,
}

impl<S: State, A: Action + PartialEq> RuleBuilder<S, A> {
    pub fn new() -> Self {
        Self {
            from: None,
            action: None,
            to: None,
            effect: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering action (required).
    pub fn on(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Attach a prepared effect (optional).
    pub fn effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Attach an async closure as the effect (optional).
    pub fn run<F, Fut>(self, effect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), EffectError>> + Send + 'static,
    {
        self.effect(Effect::new(effect))
    }

    /// Build the rule.
    pub fn build(self) -> Result<Rule<S, A>, RuleError> {
        let from = self.from.ok_or(RuleError::MissingFrom)?;
        let action = self.action.ok_or(RuleError::MissingAction)?;
        let to = self.to.ok_or(RuleError::MissingTo)?;

        Ok(Rule {
            from,
            action,
            to,
            effect: self.effect,
        })
    }
}

impl<S: State, A: Action + PartialEq> Default for RuleBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing rule tables.
///
/// # Example
///
/// ```rust
/// use statecraft::rules::{RuleBuilder, RuleTableBuilder};
///
/// let table = RuleTableBuilder::new()
///     .rule(RuleBuilder::new().from("idle").on("start").to("running"))
///     .unwrap()
///     .rule(RuleBuilder::new().from("running").on("stop").to("idle"))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
pub struct RuleTableBuilder<S, A> {
    rules: Vec<Rule<S, A>>,
    policy: DuplicatePolicy,
}

impl<S: State, A: Action + PartialEq> RuleTableBuilder<S, A> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            policy: DuplicatePolicy::Reject,
        }
    }

    /// Add a rule using a builder.
    /// Returns an error if the builder fails validation.
    pub fn rule(mut self, builder: RuleBuilder<S, A>) -> Result<Self, RuleError> {
        self.rules.push(builder.build()?);
        Ok(self)
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: Rule<S, A>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add multiple rules at once.
    pub fn rules(mut self, rules: Vec<Rule<S, A>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Choose how duplicate keys are handled (default: reject).
    pub fn policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<RuleTable<S, A>, RuleError> {
        RuleTable::with_policy(self.rules, self.policy)
    }
}

impl<S: State, A: Action + PartialEq> Default for RuleTableBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a rule without an effect.
///
/// # Example
///
/// ```
/// use statecraft::rules::rule;
///
/// let rule = rule("paused", "resume", "playing");
/// assert!(rule.matches(&"paused", &"resume"));
/// ```
pub fn rule<S: State, A: Action + PartialEq>(from: S, action: A, to: S) -> Rule<S, A> {
    Rule::new(from, action, to)
}
