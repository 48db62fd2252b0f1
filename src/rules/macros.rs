//! Macros for declaring closed transition sets.

/// Declare a transition enum and its `TransitionType` implementation.
///
/// Each variant reads `Name = From + Action => To`. Variant order is the
/// enumeration order used for lookups. Transitions declared this way carry
/// no effect; implement `TransitionType` by hand when effects are needed.
///
/// # Example
///
/// ```
/// use statecraft::rules::TransitionType;
/// use statecraft::transition_enum;
///
/// #[derive(Clone, PartialEq, Debug)]
/// pub enum Door { Open, Closed, Locked }
///
/// #[derive(Clone, PartialEq, Debug)]
/// pub enum DoorAction { Close, Open, Lock, Unlock }
///
/// transition_enum! {
///     pub enum DoorTransition: Door, DoorAction {
///         CloseDoor = Open + Close => Closed,
///         OpenDoor = Closed + Open => Open,
///         LockDoor = Closed + Lock => Locked,
///         UnlockDoor = Locked + Unlock => Closed,
///     }
/// }
///
/// assert_eq!(DoorTransition::all().len(), 4);
/// assert_eq!(DoorTransition::LockDoor.to(), Door::Locked);
/// ```
#[macro_export]
macro_rules! transition_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $state:ident, $action:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $from:ident + $act:ident => $to:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $crate::rules::TransitionType for $name {
            type State = $state;
            type Action = $action;

            fn all() -> ::std::vec::Vec<Self> {
                ::std::vec![$(Self::$variant),+]
            }

            fn from(&self) -> $state {
                match self {
                    $(Self::$variant => $state::$from),+
                }
            }

            fn action(&self) -> $action {
                match self {
                    $(Self::$variant => $action::$act),+
                }
            }

            fn to(&self) -> $state {
                match self {
                    $(Self::$variant => $state::$to),+
                }
            }
        }
    };
}
