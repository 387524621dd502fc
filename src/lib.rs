//! Tic-tac-toe move history with pluggable persistence.
//!
//! # Architecture
//!
//! - **Games**: board types, pure rules (winner, next player, status) and
//!   invariants over a history of board snapshots
//! - **History**: [`GameHistoryStore`], the snapshot list plus a cursor,
//!   supporting moves, rewinding and restarts
//! - **Persist**: the [`KeyValueStore`] seam, [`Codec`]s and
//!   [`PersistentState`] which mirrors a typed value into a store
//! - **Db**: [`SqliteStore`], a diesel-backed [`KeyValueStore`]
//!
//! # Example
//!
//! ```
//! use tictactoe_history::{GameHistoryStore, MemoryStore, Position};
//!
//! let mut game = GameHistoryStore::open(MemoryStore::new());
//! game.select_square(Position::Center);
//! assert_eq!(game.status().to_string(), "Next player: O");
//!
//! // Reopening the same store resumes the game.
//! let game = GameHistoryStore::open(game.into_store());
//! assert_eq!(game.cursor(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;
mod persist;

// Crate-level exports - Configuration
pub use config::{CONFIG_ENV_VAR, ConfigError, HistoryConfig};

// Crate-level exports - Database
pub use db::{DbError, DbOperation, KvEntry, SqliteStore};

// Crate-level exports - Persistence
pub use persist::{
    Codec, CodecError, FnCodec, JsonCodec, KeyValueStore, MemoryStore, PersistentState,
    StoreError,
};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::invariants;
pub use games::tictactoe::rules;
pub use games::tictactoe::{
    Board, DEFAULT_CURSOR_KEY, DEFAULT_HISTORY_KEY, GameHistoryStore, GameStatus, HistoryError,
    HistoryKeys, HistoryView, MoveEntry, Player, Position, Square, SquareSelection,
};
