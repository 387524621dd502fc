//! Turn calculation for tic-tac-toe.

use super::super::{Board, Player};
use tracing::instrument;

/// Returns the player to move on `board`.
///
/// Derived from the filled-square count: even means X, odd means O.
#[instrument(skip(board))]
pub fn next_player(board: &Board) -> Player {
    if board.filled_count() % 2 == 0 {
        Player::X
    } else {
        Player::O
    }
}
