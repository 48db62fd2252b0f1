//! Dispatch errors.

use thiserror::Error;

/// Errors surfaced by `dispatch`.
///
/// Neither variant leaves the machine in a corrupted state: the committed
/// state is exactly what it was before the failed dispatch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Invalid transition: no rule for action '{action}' in state '{state}'")]
    InvalidTransition { state: String, action: String },

    #[error("Machine '{label}' is no longer processing actions")]
    Stopped { label: String },
}

impl DispatchError {
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors raised while starting a machine's worker.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StartError {
    #[error("Machine '{label}' must be created inside a Tokio runtime")]
    NoRuntime { label: String },
}
