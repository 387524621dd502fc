//! Every history begins at the empty board.

use super::super::HistoryView;
use super::Invariant;

/// Invariant: history is non-empty and its first snapshot is the empty board.
pub struct StartsEmptyInvariant;

impl Invariant<HistoryView<'_>> for StartsEmptyInvariant {
    fn holds(view: &HistoryView<'_>) -> bool {
        view.boards().first().is_some_and(|board| board.is_blank())
    }

    fn description() -> &'static str {
        "History starts with the empty board"
    }
}
