//! Transition rules: the legality table of a transition engine.
//!
//! - `Rule`: one legal `(from, action) -> to` mapping plus optional effect
//! - `TransitionType`: a closed enumerable set of rules (usually an enum)
//! - `RuleTable`: the validated, immutable lookup table built from rules
//! - `Effect`: async fallible side effect run before a rule commits

pub mod builder;
pub mod effect;
pub mod error;
pub mod macros;
pub mod rule;
pub mod table;

pub use builder::{rule, RuleBuilder, RuleTableBuilder};
pub use effect::{Effect, EffectFuture};
pub use error::{EffectError, RuleError};
pub use rule::{Rule, TransitionType};
pub use table::{DuplicatePolicy, RuleTable};
