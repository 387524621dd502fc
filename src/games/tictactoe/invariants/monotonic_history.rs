//! Monotonic history invariant: each snapshot adds exactly one mark.

use super::super::{Board, HistoryView, Square};
use super::Invariant;

/// Invariant: every snapshot equals its predecessor plus one newly filled square.
///
/// Squares are never cleared or overwritten between snapshots.
pub struct MonotonicHistoryInvariant;

impl MonotonicHistoryInvariant {
    fn is_single_placement(before: &Board, after: &Board) -> bool {
        let mut placed = 0;
        for (b, a) in before.squares().iter().zip(after.squares()) {
            match (b, a) {
                (b, a) if b == a => {}
                (Square::Empty, Square::Occupied(_)) => placed += 1,
                _ => return false,
            }
        }
        placed == 1
    }
}

impl Invariant<HistoryView<'_>> for MonotonicHistoryInvariant {
    fn holds(view: &HistoryView<'_>) -> bool {
        view.boards()
            .windows(2)
            .all(|pair| Self::is_single_placement(&pair[0], &pair[1]))
    }

    fn description() -> &'static str {
        "Each snapshot adds exactly one mark to the previous one"
    }
}
