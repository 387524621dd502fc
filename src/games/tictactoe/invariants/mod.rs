//! First-class invariants over a game history.
//!
//! Invariants are logical properties that must hold for every history the
//! store exposes. They gate what is accepted from persistence and are
//! asserted in debug builds after every mutation.

use derive_more::Display;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Invariant violated: {}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of up to five invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>),+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);

pub mod alternating_turn;
pub mod cursor_in_bounds;
pub mod monotonic_history;
pub mod no_move_after_win;
pub mod starts_empty;

pub use alternating_turn::AlternatingTurnInvariant;
pub use cursor_in_bounds::CursorInBoundsInvariant;
pub use monotonic_history::MonotonicHistoryInvariant;
pub use no_move_after_win::NoMoveAfterWinInvariant;
pub use starts_empty::StartsEmptyInvariant;

/// Invariants on the board sequence alone, independent of the cursor.
pub type BoardSequenceInvariants = (
    StartsEmptyInvariant,
    MonotonicHistoryInvariant,
    AlternatingTurnInvariant,
    NoMoveAfterWinInvariant,
);

/// Every history invariant, cursor included.
pub type HistoryInvariants = (
    StartsEmptyInvariant,
    MonotonicHistoryInvariant,
    AlternatingTurnInvariant,
    NoMoveAfterWinInvariant,
    CursorInBoundsInvariant,
);
