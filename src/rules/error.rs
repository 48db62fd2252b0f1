//! Errors raised while defining rules and running their effects.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when building rules and rule tables.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuleError {
    #[error(
        "Duplicate rule for state '{from}' and action '{action}' at position {duplicate} \
         (first defined at position {first})"
    )]
    DuplicateRule {
        from: String,
        action: String,
        first: usize,
        duplicate: usize,
    },

    #[error("Rule table rejected: {} duplicate rule(s)", .0.len())]
    InvalidTable(Vec<RuleError>),

    #[error("Rule source state not specified. Call .from(state)")]
    MissingFrom,

    #[error("Rule action not specified. Call .on(action)")]
    MissingAction,

    #[error("Rule target state not specified. Call .to(state)")]
    MissingTo,
}

/// Failure reported by a transition's side effect.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EffectError {
    #[error("Effect failed: {0}")]
    Failed(String),

    #[error("Effect timed out after {0:?}")]
    TimedOut(Duration),
}

impl EffectError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}
