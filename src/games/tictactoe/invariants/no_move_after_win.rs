//! A won board is final.

use super::super::HistoryView;
use super::super::rules::check_winner;
use super::Invariant;

/// Invariant: no snapshot follows one that already has a winner.
pub struct NoMoveAfterWinInvariant;

impl Invariant<HistoryView<'_>> for NoMoveAfterWinInvariant {
    fn holds(view: &HistoryView<'_>) -> bool {
        let boards = view.boards();
        let last = boards.len().saturating_sub(1);
        boards
            .iter()
            .take(last)
            .all(|board| check_winner(board).is_none())
    }

    fn description() -> &'static str {
        "No move is recorded after the game is won"
    }
}
