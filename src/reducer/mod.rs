//! Free-form reducer machine.
//!
//! The next state is whatever the reducer returns. The machine only
//! guarantees serialization and publication: one action at a time, each
//! reducer call sees the previous commit, readers only see committed values.

mod machine;

pub use machine::{Reducer, ReducerMachine};
