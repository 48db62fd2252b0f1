//! Statecraft: in-process state machines with serialized async dispatch
//!
//! Two complementary engines drive an entity's state through a sequence of
//! actions:
//!
//! - [`ReducerMachine`]: free-form. The next state is whatever an (async)
//!   reducer returns. `dispatch` enqueues and returns immediately; a single
//!   worker applies actions in order.
//! - [`TransitionEngine`]: table-driven. Every action is checked against a
//!   closed set of `(state, action) -> state` rules, an optional async
//!   effect runs before the commit, and a hook observes each commit.
//!   `dispatch` completes only once the transition is committed.
//!
//! [`testing::MockMachine`] mirrors the reducer machine synchronously for
//! deterministic tests.
//!
//! # Core Concepts
//!
//! - **State** / **Action**: opaque values; see [`core`](crate::core)
//! - **Rule**: one legal transition with an optional [`rules::Effect`]
//! - **Commit**: atomic publication of a new state, followed by
//!   notification of the hook and subscribers
//!
//! # Example
//!
//! ```rust
//! use statecraft::{hook, transition_enum, TransitionEngine};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! enum Player { Idle, Playing, Paused }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! enum Control { Play, Pause }
//!
//! transition_enum! {
//!     enum PlayerTransition: Player, Control {
//!         IdlePlay = Idle + Play => Playing,
//!         PlayingPause = Playing + Pause => Paused,
//!         PausedPlay = Paused + Play => Playing,
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let engine = TransitionEngine::for_transitions::<PlayerTransition>(
//!     Player::Idle,
//!     Some(hook(|state: &Player| println!("state -> {state:?}"))),
//! )
//! .unwrap();
//!
//! engine.dispatch(Control::Play).await.unwrap();
//! assert_eq!(engine.state(), Player::Playing);
//!
//! // No rule for Play while already playing: rejected, state unchanged.
//! assert!(engine.dispatch(Control::Play).await.is_err());
//! assert_eq!(engine.state(), Player::Playing);
//! # });
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod machine;
pub mod observe;
pub mod reducer;
pub mod rules;
pub mod testing;

// Re-export commonly used types
pub use config::MachineConfig;
pub use crate::core::{Action, EffectOutcome, State, StateHistory, TransitionRecord};
pub use engine::{hook, Dispatched, Hook, TransitionEngine};
pub use machine::{DispatchError, DispatchResult, Machine, StartError};
pub use observe::Subscription;
pub use reducer::ReducerMachine;
pub use rules::{DuplicatePolicy, Effect, EffectError, Rule, RuleError, RuleTable, TransitionType};
