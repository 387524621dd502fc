//! Tic-tac-toe: board types, rules, invariants and the persisted history.

mod history;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use history::{
    DEFAULT_CURSOR_KEY, DEFAULT_HISTORY_KEY, GameHistoryStore, HistoryError, HistoryKeys,
    HistoryView, MoveEntry, SquareSelection,
};
pub use position::Position;
pub use rules::GameStatus;
pub use types::{Board, Player, Square};
