//! Asset lifecycle state machine
//!
//! Every asset instance starts `Uninitialized` and settles exactly once:
//!
//! ```text
//! Uninitialized --generate--> Generated | Skipped | Invalid
//! Uninitialized --load------> Loaded    | Invalid
//! ```
//!
//! A load that finds no file, or finds one that does not decode, leaves the
//! asset `Uninitialized`.

use std::fmt::{self, Display, Formatter};

/// Lifecycle state of one asset instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssetState {
    /// Nothing produced yet
    #[default]
    Uninitialized,
    /// Built from resolved dependencies and validated
    Generated,
    /// Rehydrated from a previously written file and validated
    Loaded,
    /// Generation or load failed; terminal
    Invalid,
    /// Upstream configuration intentionally absent; terminal, not an error
    Skipped,
}

impl AssetState {
    /// All states, in declaration order
    pub const ALL: [AssetState; 5] = [
        AssetState::Uninitialized,
        AssetState::Generated,
        AssetState::Loaded,
        AssetState::Invalid,
        AssetState::Skipped,
    ];

    /// Whether no further lifecycle call is accepted
    #[inline]
    #[must_use]
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// Whether the asset holds a usable, validated object
    #[inline]
    #[must_use]
    pub fn is_usable(self) -> bool {
        matches!(self, Self::Generated | Self::Loaded)
    }

    /// Fail unless generate/load may still run
    ///
    /// # Errors
    /// Returns [`TransitionError::Settled`] once the asset has left `Uninitialized`
    pub fn ensure_open(self) -> Result<(), TransitionError> {
        if self.is_settled() {
            Err(TransitionError::Settled(self))
        } else {
            Ok(())
        }
    }
}

impl Display for AssetState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Generated => "generated",
            Self::Loaded => "loaded",
            Self::Invalid => "invalid",
            Self::Skipped => "skipped",
        };
        f.write_str(name)
    }
}

/// Illegal lifecycle movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The target is not reachable from the current state
    #[error("illegal lifecycle transition: {from} -> {to}")]
    Illegal { from: AssetState, to: AssetState },

    /// The asset already settled and accepts no further generate/load
    #[error("asset already {0}")]
    Settled(AssetState),
}

/// States reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: AssetState) -> &'static [AssetState] {
    use AssetState::*;
    match from {
        Uninitialized => &[Generated, Loaded, Invalid, Skipped],
        Generated | Loaded | Invalid | Skipped => &[],
    }
}

/// Validates a state transition.
///
/// # Errors
/// Returns [`TransitionError::Illegal`] if `to` is not reachable from `from`
pub fn validate_transition(from: AssetState, to: AssetState) -> Result<(), TransitionError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(TransitionError::Illegal { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn uninitialized_reaches_every_outcome() {
        for to in [
            AssetState::Generated,
            AssetState::Loaded,
            AssetState::Invalid,
            AssetState::Skipped,
        ] {
            assert!(validate_transition(AssetState::Uninitialized, to).is_ok());
        }
    }

    #[test]
    fn settled_states_are_terminal() {
        assert_eq!(
            validate_transition(AssetState::Generated, AssetState::Loaded),
            Err(TransitionError::Illegal {
                from: AssetState::Generated,
                to: AssetState::Loaded,
            })
        );
        assert!(validate_transition(AssetState::Skipped, AssetState::Generated).is_err());
        assert!(validate_transition(AssetState::Invalid, AssetState::Loaded).is_err());
    }

    #[test]
    fn ensure_open_only_before_settling() {
        assert!(AssetState::Uninitialized.ensure_open().is_ok());
        assert_eq!(
            AssetState::Loaded.ensure_open(),
            Err(TransitionError::Settled(AssetState::Loaded))
        );
    }

    #[test]
    fn usable_states() {
        assert!(AssetState::Generated.is_usable());
        assert!(AssetState::Loaded.is_usable());
        assert!(!AssetState::Skipped.is_usable());
        assert!(!AssetState::Invalid.is_usable());
        assert!(!AssetState::Uninitialized.is_usable());
    }

    proptest! {
        #[test]
        fn prop_validation_matches_allowed_table(
            from in prop::sample::select(AssetState::ALL.to_vec()),
            to in prop::sample::select(AssetState::ALL.to_vec()),
        ) {
            let allowed = allowed_transitions(from).contains(&to);
            prop_assert_eq!(validate_transition(from, to).is_ok(), allowed);
        }

        #[test]
        fn prop_nothing_transitions_to_uninitialized(
            from in prop::sample::select(AssetState::ALL.to_vec()),
        ) {
            prop_assert!(validate_transition(from, AssetState::Uninitialized).is_err());
        }
    }
}
