//! Table-driven transition engine.
//!
//! For each dispatched action the engine:
//!
//! 1. looks up the first rule matching `(current state, action)`;
//! 2. rejects the action as an invalid transition when none matches;
//! 3. runs the rule's effect, logging but tolerating failure;
//! 4. commits `rule.to`, then calls the hook and subscribers.

mod machine;

pub use machine::{hook, Dispatched, Hook, TransitionEngine};
