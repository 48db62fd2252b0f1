//! Core value types shared by every machine.
//!
//! - `State` and `Action` capability traits
//! - Immutable transition history records

mod history;
mod state;

pub use history::{EffectOutcome, StateHistory, TransitionRecord};
pub use state::{Action, State};
