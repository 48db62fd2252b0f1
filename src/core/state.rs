//! Capability traits for machine states and actions.
//!
//! The engines treat states and actions as opaque values. The only things
//! they need are cloning (to publish snapshots), equality (to match rules)
//! and `Debug` (for diagnostics). Both traits are blanket-implemented, so
//! plain enums, `&'static str` and `String` all work out of the box.

use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: committed states are handed out as snapshots
/// - `PartialEq`: rule lookup compares the current state with `rule.from`
/// - `Debug`: states are rendered into logs and errors
/// - `Send + Sync + 'static`: states cross task boundaries
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// fn label<S: State>(state: &S) -> String {
///     state.name()
/// }
///
/// assert_eq!(label(&Door::Open), "Open");
/// assert_eq!(label(&"idle"), "\"idle\"");
/// ```
pub trait State: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    ///
    /// Default implementation uses the `Debug` rendering.
    fn name(&self) -> String {
        format!("{self:?}")
    }
}

impl<T> State for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

/// Trait for actions dispatched into a machine.
///
/// Reducer machines accept any action; the transition engine additionally
/// requires `PartialEq` so actions can be matched against rules.
pub trait Action: Clone + Debug + Send + Sync + 'static {
    /// Get the action's name for display/logging.
    fn name(&self) -> String {
        format!("{self:?}")
    }
}

impl<T> Action for T where T: Clone + Debug + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Begin,
        Finish { code: u8 },
    }

    #[test]
    fn state_name_uses_debug_rendering() {
        assert_eq!(State::name(&TestState::Initial), "Initial");
        assert_eq!(State::name(&TestState::Processing), "Processing");
        assert_eq!(State::name(&TestState::Complete), "Complete");
    }

    #[test]
    fn string_states_are_supported() {
        assert_eq!(State::name(&"idle"), "\"idle\"");
        assert_eq!(State::name(&String::from("running")), "\"running\"");
    }

    #[test]
    fn action_name_includes_payload() {
        assert_eq!(Action::name(&TestAction::Begin), "Begin");
        assert_eq!(
            Action::name(&TestAction::Finish { code: 2 }),
            "Finish { code: 2 }"
        );
    }

    #[test]
    fn state_is_comparable() {
        let state1 = TestState::Processing;
        let state2 = TestState::Processing;
        let state3 = TestState::Complete;

        assert_eq!(state1, state2);
        assert_ne!(state1, state3);
    }
}
