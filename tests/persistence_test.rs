//! Tests for persisting a game through a key-value store.

use tictactoe_history::{
    Board, DEFAULT_CURSOR_KEY, DEFAULT_HISTORY_KEY, GameHistoryStore, HistoryKeys, KeyValueStore,
    MemoryStore, Player, Position, Square,
};

fn seeded(history: &str, cursor: &str) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.set(DEFAULT_HISTORY_KEY, history).expect("set failed");
    store.set(DEFAULT_CURSOR_KEY, cursor).expect("set failed");
    store
}

#[test]
fn test_round_trip_through_store() {
    let mut game = GameHistoryStore::open(MemoryStore::new());
    for pos in [Position::Center, Position::TopLeft, Position::BottomRight] {
        game.select_square(pos);
    }
    game.select_move(2).expect("in range");
    let history = game.history().to_vec();

    let reopened = GameHistoryStore::open(game.into_store());

    assert_eq!(reopened.history(), history.as_slice());
    assert_eq!(reopened.cursor(), 2);
}

#[test]
fn test_every_mutation_is_written() {
    let mut game = GameHistoryStore::open(MemoryStore::new());
    game.select_square(Position::Center);
    game.select_move(0).expect("in range");

    let store = game.into_store();
    assert_eq!(store.raw(DEFAULT_CURSOR_KEY), Some("0"));
    assert_eq!(
        store.raw(DEFAULT_HISTORY_KEY),
        Some(
            r#"[[null,null,null,null,null,null,null,null,null],[null,null,null,null,"X",null,null,null,null]]"#
        )
    );
}

#[test]
fn test_opening_writes_defaults() {
    let store = GameHistoryStore::open(MemoryStore::new()).into_store();
    assert!(store.contains_key(DEFAULT_HISTORY_KEY));
    assert_eq!(store.raw(DEFAULT_CURSOR_KEY), Some("0"));
}

#[test]
fn test_reads_history_written_by_other_clients() {
    let store = seeded(
        r#"[[null,null,null,null,null,null,null,null,null],["X",null,null,null,null,null,null,null,null]]"#,
        "1",
    );
    let game = GameHistoryStore::open(store);

    assert_eq!(game.cursor(), 1);
    assert_eq!(game.current_board().get(Position::TopLeft), Square::Occupied(Player::X));
}

#[test]
fn test_stored_cursor_zero_is_kept() {
    let store = seeded(
        r#"[[null,null,null,null,null,null,null,null,null],["X",null,null,null,null,null,null,null,null]]"#,
        "0",
    );
    let game = GameHistoryStore::open(store);

    assert_eq!(game.cursor(), 0);
    assert_eq!(game.history().len(), 2);
}

#[test]
fn test_corrupt_history_falls_back_to_new_game() {
    let game = GameHistoryStore::open(seeded("not json", "3"));

    assert_eq!(game.history(), &[Board::new()]);
    assert_eq!(game.cursor(), 0);
}

#[test]
fn test_illegal_history_is_discarded() {
    // Second snapshot has O moving first.
    let store = seeded(
        r#"[[null,null,null,null,null,null,null,null,null],["O",null,null,null,null,null,null,null,null]]"#,
        "1",
    );
    let game = GameHistoryStore::open(store);

    assert_eq!(game.history().len(), 1);
    assert_eq!(game.cursor(), 0);
    let store = game.into_store();
    assert_eq!(
        store.raw(DEFAULT_HISTORY_KEY),
        Some("[[null,null,null,null,null,null,null,null,null]]")
    );
}

#[test]
fn test_empty_history_array_is_discarded() {
    let game = GameHistoryStore::open(seeded("[]", "0"));
    assert_eq!(game.history().len(), 1);
}

#[test]
fn test_cursor_past_end_is_clamped() {
    let store = seeded(
        r#"[[null,null,null,null,null,null,null,null,null],["X",null,null,null,null,null,null,null,null]]"#,
        "7",
    );
    let game = GameHistoryStore::open(store);

    assert_eq!(game.history().len(), 2);
    assert_eq!(game.cursor(), 1);
}

#[test]
fn test_unreadable_cursor_defaults_to_zero() {
    let store = seeded(
        r#"[[null,null,null,null,null,null,null,null,null],["X",null,null,null,null,null,null,null,null]]"#,
        r#""one""#,
    );
    let game = GameHistoryStore::open(store);

    assert_eq!(game.cursor(), 0);
    assert_eq!(game.history().len(), 2);
}

#[test]
fn test_games_under_different_keys_are_independent() {
    let alice = HistoryKeys::new("alice:history", "alice:cursor").expect("distinct keys");
    let bob = HistoryKeys::new("bob:history", "bob:cursor").expect("distinct keys");

    let mut game = GameHistoryStore::open_with_keys(MemoryStore::new(), alice.clone());
    game.select_square(Position::Center);
    let mut game = GameHistoryStore::open_with_keys(game.into_store(), bob);
    assert_eq!(game.cursor(), 0);
    game.select_square(Position::TopLeft);
    game.select_square(Position::TopRight);

    let game = GameHistoryStore::open_with_keys(game.into_store(), alice);
    assert_eq!(game.cursor(), 1);
    assert_eq!(game.current_board().get(Position::Center), Square::Occupied(Player::X));
}

#[test]
fn test_store_can_be_borrowed() {
    let mut store = MemoryStore::new();
    {
        let mut game = GameHistoryStore::open(&mut store);
        game.select_square(Position::Center);
    }
    assert_eq!(store.raw(DEFAULT_CURSOR_KEY), Some("1"));
}

#[test]
fn test_rekeying_onto_old_keys_survives_reopen() {
    let mut game = GameHistoryStore::open(MemoryStore::new());
    game.select_square(Position::Center);
    game.select_square(Position::TopLeft);

    let swapped = HistoryKeys::new(DEFAULT_CURSOR_KEY, DEFAULT_HISTORY_KEY).expect("distinct keys");
    game.set_keys(swapped.clone());

    let game = GameHistoryStore::open_with_keys(game.into_store(), swapped);
    assert_eq!(game.history().len(), 3);
    assert_eq!(game.cursor(), 2);
    assert_eq!(game.current_board().get(Position::TopLeft), Square::Occupied(Player::O));
}
