//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::rules::next_player;
use super::super::{Board, HistoryView, Square};
use super::Invariant;

/// Invariant: the mark added by each snapshot belongs to the player whose
/// turn it was on the previous snapshot.
pub struct AlternatingTurnInvariant;

impl AlternatingTurnInvariant {
    fn placed_by_mover(before: &Board, after: &Board) -> bool {
        let mover = Square::Occupied(next_player(before));
        before
            .squares()
            .iter()
            .zip(after.squares())
            .filter(|(b, a)| b != a)
            .all(|(_, a)| *a == mover)
    }
}

impl Invariant<HistoryView<'_>> for AlternatingTurnInvariant {
    fn holds(view: &HistoryView<'_>) -> bool {
        view.boards()
            .windows(2)
            .all(|pair| Self::placed_by_mover(&pair[0], &pair[1]))
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Player, Position};

    #[test]
    fn test_x_then_o_holds() {
        let first = Board::new();
        let second = first.with(Position::Center, Square::Occupied(Player::X));
        let third = second.with(Position::TopLeft, Square::Occupied(Player::O));
        let boards = vec![first, second, third];
        assert!(AlternatingTurnInvariant::holds(&HistoryView::new(&boards, 0)));
    }

    #[test]
    fn test_o_first_violates() {
        let first = Board::new();
        let second = first.with(Position::Center, Square::Occupied(Player::O));
        let boards = vec![first, second];
        assert!(!AlternatingTurnInvariant::holds(&HistoryView::new(&boards, 1)));
    }

    #[test]
    fn test_same_player_twice_violates() {
        let first = Board::new();
        let second = first.with(Position::TopLeft, Square::Occupied(Player::X));
        let third = second.with(Position::Center, Square::Occupied(Player::X));
        let boards = vec![first, second, third];
        assert!(!AlternatingTurnInvariant::holds(&HistoryView::new(&boards, 2)));
    }
}
