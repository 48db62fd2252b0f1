//! Transition rules and closed rule sets.

use crate::core::{Action, State};
use crate::rules::effect::Effect;

/// A single legal `(from, action) -> to` mapping with an optional effect.
#[derive(Clone, Debug)]
pub struct Rule<S, A> {
    pub from: S,
    pub action: A,
    pub to: S,
    pub effect: Option<Effect>,
}

impl<S: State, A: Action + PartialEq> Rule<S, A> {
    /// Create a rule without an effect.
    pub fn new(from: S, action: A, to: S) -> Self {
        Self {
            from,
            action,
            to,
            effect: None,
        }
    }

    /// Attach an effect that runs before the rule commits.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Check if this rule applies to `action` dispatched in `state` (pure)
    pub fn matches(&self, state: &S, action: &A) -> bool {
        self.from == *state && self.action == *action
    }
}

/// A closed, enumerable set of transitions.
///
/// Implement this on an enum with one variant per legal transition; the
/// variant order defines the enumeration order used for lookups. The
/// [`transition_enum!`](crate::transition_enum) macro generates the
/// boilerplate for rules without effects.
///
/// # Example
///
/// ```rust
/// use statecraft::rules::{Effect, TransitionType};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Light { Off, On }
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Switch { Flip }
///
/// #[derive(Clone, Copy, Debug)]
/// enum LightTransition { TurnOn, TurnOff }
///
/// impl TransitionType for LightTransition {
///     type State = Light;
///     type Action = Switch;
///
///     fn all() -> Vec<Self> {
///         vec![Self::TurnOn, Self::TurnOff]
///     }
///
///     fn from(&self) -> Light {
///         match self {
///             Self::TurnOn => Light::Off,
///             Self::TurnOff => Light::On,
///         }
///     }
///
///     fn action(&self) -> Switch {
///         Switch::Flip
///     }
///
///     fn to(&self) -> Light {
///         match self {
///             Self::TurnOn => Light::On,
///             Self::TurnOff => Light::Off,
///         }
///     }
///
///     fn effect(&self) -> Option<Effect> {
///         match self {
///             Self::TurnOn => Some(Effect::from_fn(|| Ok(()))),
///             Self::TurnOff => None,
///         }
///     }
/// }
///
/// let rule = LightTransition::TurnOn.rule();
/// assert!(rule.matches(&Light::Off, &Switch::Flip));
/// assert!(rule.effect.is_some());
/// ```
pub trait TransitionType: Sized + 'static {
    type State: State;
    type Action: Action + PartialEq;

    /// Every transition, in enumeration order.
    fn all() -> Vec<Self>;

    fn from(&self) -> Self::State;

    fn action(&self) -> Self::Action;

    fn to(&self) -> Self::State;

    /// Side effect run before the transition commits.
    ///
    /// Default implementation returns `None`.
    fn effect(&self) -> Option<Effect> {
        None
    }

    /// Flatten this transition into a table rule.
    fn rule(&self) -> Rule<Self::State, Self::Action> {
        Rule {
            from: self.from(),
            action: self.action(),
            to: self.to(),
            effect: self.effect(),
        }
    }
}
