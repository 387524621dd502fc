//! Tests for the game history store.

use tictactoe_history::{
    Board, GameHistoryStore, GameStatus, MemoryStore, Player, Position, Square, SquareSelection,
};

fn position(index: usize) -> Position {
    Position::from_index(index).expect("valid index")
}

fn new_game() -> GameHistoryStore<MemoryStore> {
    GameHistoryStore::open(MemoryStore::new())
}

fn play(game: &mut GameHistoryStore<MemoryStore>, indices: &[usize]) {
    for &i in indices {
        let outcome = game.select_square(position(i));
        assert!(
            matches!(outcome, SquareSelection::Placed { .. }),
            "move {i} was ignored: {outcome}"
        );
    }
}

#[test]
fn test_first_move_in_center() {
    let mut game = new_game();
    let outcome = game.select_square(Position::Center);

    assert_eq!(
        outcome,
        SquareSelection::Placed {
            player: Player::X,
            position: Position::Center,
            move_number: 1,
        }
    );
    assert_eq!(game.current_board().get(Position::Center), Square::Occupied(Player::X));
    assert_eq!(game.cursor(), 1);
    assert_eq!(game.history().len(), 2);
}

#[test]
fn test_left_column_wins_for_x() {
    let mut game = new_game();
    play(&mut game, &[0, 1, 3, 4, 6]);

    assert_eq!(game.status(), GameStatus::Won(Player::X));
    assert_eq!(game.status().to_string(), "Winner: X");
}

#[test]
fn test_occupied_square_is_a_no_op() {
    let mut game = new_game();
    play(&mut game, &[4]);
    let history_before = game.history().to_vec();

    let outcome = game.select_square(Position::Center);

    assert_eq!(outcome, SquareSelection::Occupied(Position::Center));
    assert_eq!(game.history(), history_before.as_slice());
    assert_eq!(game.cursor(), 1);
}

#[test]
fn test_moves_after_win_are_ignored() {
    let mut game = new_game();
    play(&mut game, &[0, 1, 3, 4, 6]);
    let len = game.history().len();

    for index in [2, 5, 7, 8] {
        assert_eq!(
            game.select_square(position(index)),
            SquareSelection::AlreadyWon(Player::X)
        );
    }
    assert_eq!(game.history().len(), len);
    assert_eq!(game.cursor(), len - 1);
}

#[test]
fn test_rewinding_past_a_win_allows_play_again() {
    let mut game = new_game();
    play(&mut game, &[0, 1, 3, 4, 6]);
    game.select_move(4).expect("in range");

    let outcome = game.select_square(Position::BottomRight);

    assert!(matches!(outcome, SquareSelection::Placed { player: Player::X, .. }));
    assert_eq!(game.history().len(), 6);
    assert_eq!(game.status(), GameStatus::InProgress { next: Player::O });
}

#[test]
fn test_restart_resets_to_single_empty_board() {
    let mut game = new_game();
    play(&mut game, &[0, 4, 8]);
    game.restart();

    assert_eq!(game.history(), &[Board::new()]);
    assert_eq!(game.cursor(), 0);
}

#[test]
fn test_jump_to_start_keeps_history() {
    let mut game = new_game();
    play(&mut game, &[0, 4, 8]);
    game.select_move(0).expect("in range");

    assert!(game.current_board().is_blank());
    assert_eq!(game.history().len(), 4);
    assert_eq!(game.status().to_string(), "Next player: X");
}

#[test]
fn test_turns_alternate_along_history() {
    let mut game = new_game();
    play(&mut game, &[4, 0, 8, 2, 6]);

    for (index, board) in game.history().iter().enumerate() {
        let expected = if index % 2 == 0 { Player::X } else { Player::O };
        assert_eq!(board.filled_count(), index);
        assert_eq!(tictactoe_history::rules::next_player(board), expected);
    }
}

#[test]
fn test_jump_out_of_range_is_an_error() {
    let mut game = new_game();
    assert!(game.select_move(1).is_err());
    assert_eq!(game.cursor(), 0);
}
