//! Persisted move history for a tic-tac-toe game.
//!
//! The game is a list of board snapshots plus a cursor selecting the one
//! being shown. Moves truncate any snapshots after the cursor before
//! appending, so rewinding and playing on discards the old future.
//! History and cursor live under separate keys of an injected
//! [`KeyValueStore`].

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use super::invariants::{BoardSequenceInvariants, InvariantSet};
#[cfg(debug_assertions)]
use super::invariants::HistoryInvariants;
use super::rules::{self, GameStatus};
use super::{Board, Player, Position, Square};
use crate::persist::{KeyValueStore, PersistentState};

/// Default storage key for the board snapshots.
pub const DEFAULT_HISTORY_KEY: &str = "tic-tac-toe:history";

/// Default storage key for the cursor.
pub const DEFAULT_CURSOR_KEY: &str = "tic-tac-toe:current-move";

/// Storage keys used by a [`GameHistoryStore`].
///
/// The two keys are always distinct.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HistoryKeys {
    /// Key holding the JSON array of boards.
    history: String,
    /// Key holding the cursor index.
    cursor: String,
}

impl HistoryKeys {
    /// Pairs a history key with a cursor key.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::KeyCollision`] if both keys are the same.
    pub fn new(
        history: impl Into<String>,
        cursor: impl Into<String>,
    ) -> Result<Self, HistoryError> {
        let history = history.into();
        let cursor = cursor.into();
        if history == cursor {
            return Err(HistoryError::KeyCollision { key: history });
        }
        Ok(Self { history, cursor })
    }
}

impl Default for HistoryKeys {
    fn default() -> Self {
        Self {
            history: DEFAULT_HISTORY_KEY.to_string(),
            cursor: DEFAULT_CURSOR_KEY.to_string(),
        }
    }
}

/// Read-only view of a history and its cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryView<'a> {
    boards: &'a [Board],
    cursor: usize,
}

impl<'a> HistoryView<'a> {
    /// Creates a view. Nothing is validated here; see the invariants module.
    pub fn new(boards: &'a [Board], cursor: usize) -> Self {
        Self { boards, cursor }
    }

    /// All snapshots, oldest first.
    pub fn boards(&self) -> &'a [Board] {
        self.boards
    }

    /// Index of the current snapshot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The snapshot under the cursor, if the cursor is in range.
    pub fn current_board(&self) -> Option<&'a Board> {
        self.boards.get(self.cursor)
    }
}

/// Result of [`GameHistoryStore::select_square`].
///
/// Only `Placed` changes any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SquareSelection {
    /// A mark was placed and became the new current snapshot.
    #[display("{player} played {position} (move #{move_number})")]
    Placed {
        /// Player whose mark was placed.
        player: Player,
        /// Where it was placed.
        position: Position,
        /// Index of the new snapshot.
        move_number: usize,
    },
    /// The square already holds a mark.
    #[display("{_0} is already taken")]
    Occupied(Position),
    /// The current board already has a winner.
    #[display("Game already won by {_0}")]
    AlreadyWon(Player),
}

/// Errors from history navigation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum HistoryError {
    /// A move index past the end of the history.
    #[display("Move #{index} does not exist (history has {len} snapshots)")]
    MoveOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of snapshots in the history.
        len: usize,
    },
    /// History and cursor were given the same storage key.
    #[display("History and cursor cannot share the storage key '{key}'")]
    KeyCollision {
        /// The shared key.
        key: String,
    },
}

/// One entry of the move list.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MoveEntry {
    index: usize,
    description: String,
    current: bool,
}

impl MoveEntry {
    fn new(index: usize, current: bool) -> Self {
        let description = if index == 0 {
            "Go to game start".to_string()
        } else {
            format!("Go to move #{index}")
        };
        Self {
            index,
            description,
            current,
        }
    }
}

impl std::fmt::Display for MoveEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.current {
            write!(f, "{} (current)", self.description)
        } else {
            write!(f, "{}", self.description)
        }
    }
}

type HistorySubscriber = Box<dyn FnMut(HistoryView<'_>)>;

/// Tic-tac-toe history and cursor, persisted through a [`KeyValueStore`].
pub struct GameHistoryStore<S> {
    store: S,
    history: PersistentState<Vec<Board>>,
    cursor: PersistentState<usize>,
    subscribers: Vec<HistorySubscriber>,
}

impl<S: KeyValueStore> GameHistoryStore<S> {
    /// Opens the game under the default keys.
    pub fn open(store: S) -> Self {
        Self::open_with_keys(store, HistoryKeys::default())
    }

    /// Opens the game stored under `keys`, or starts a new one.
    ///
    /// A persisted history that breaks any board-sequence invariant is
    /// discarded along with its cursor. A cursor past the end of an otherwise
    /// valid history is clamped to the last snapshot.
    #[instrument(skip(store, keys), fields(history_key = %keys.history, cursor_key = %keys.cursor))]
    pub fn open_with_keys(mut store: S, keys: HistoryKeys) -> Self {
        let mut history = PersistentState::load_with(&mut store, keys.history, initial_history);
        let mut cursor = PersistentState::load(&mut store, keys.cursor, 0_usize);

        if let Err(violations) =
            BoardSequenceInvariants::check_all(&HistoryView::new(history.get(), *cursor.get()))
        {
            for violation in &violations {
                warn!(%violation, "Persisted history rejected");
            }
            history.set(&mut store, initial_history());
            cursor.set(&mut store, 0);
        }

        let last = history.get().len() - 1;
        if *cursor.get() > last {
            warn!(cursor = *cursor.get(), last, "Persisted cursor out of range, clamping");
            cursor.set(&mut store, last);
        }

        info!(
            snapshots = history.get().len(),
            cursor = *cursor.get(),
            "Game history opened"
        );

        let opened = Self {
            store,
            history,
            cursor,
            subscribers: Vec::new(),
        };
        opened.debug_check();
        opened
    }

    /// Plays the current player's mark at `position`.
    ///
    /// Does nothing if the current board is already won or the square is
    /// taken. Otherwise snapshots after the cursor are dropped, the new board
    /// is appended and the cursor moves to it.
    #[instrument(skip(self), fields(cursor = *self.cursor.get()))]
    pub fn select_square(&mut self, position: Position) -> SquareSelection {
        let board = *self.current_board();

        if let Some(winner) = rules::check_winner(&board) {
            debug!(%winner, "Ignoring move on a won board");
            return SquareSelection::AlreadyWon(winner);
        }
        if !board.is_empty(position) {
            debug!("Ignoring move on an occupied square");
            return SquareSelection::Occupied(position);
        }

        let player = rules::next_player(&board);
        let next = board.with(position, Square::Occupied(player));
        let move_number = *self.cursor.get() + 1;

        self.history.update(&mut self.store, |history| {
            history.truncate(move_number);
            history.push(next);
        });
        self.cursor.set(&mut self.store, move_number);

        info!(%player, %position, move_number, "Move played");
        self.after_mutation();
        SquareSelection::Placed {
            player,
            position,
            move_number,
        }
    }

    /// Moves the cursor to snapshot `move_index` without touching the history.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::MoveOutOfRange`] if there is no such snapshot;
    /// the cursor is left where it was.
    #[instrument(skip(self))]
    pub fn select_move(&mut self, move_index: usize) -> Result<(), HistoryError> {
        let len = self.history.get().len();
        if move_index >= len {
            warn!(len, "Move selection out of range");
            return Err(HistoryError::MoveOutOfRange {
                index: move_index,
                len,
            });
        }

        self.cursor.set(&mut self.store, move_index);
        debug!("Cursor moved");
        self.after_mutation();
        Ok(())
    }

    /// Starts over with a single empty board.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.history.set(&mut self.store, initial_history());
        self.cursor.set(&mut self.store, 0);
        info!("Game restarted");
        self.after_mutation();
    }

    /// Moves both entries to new storage keys, removing the old ones.
    ///
    /// Both old entries are removed before either new one is written, so the
    /// new keys may reuse the old ones in any order.
    #[instrument(skip(self, keys), fields(history_key = %keys.history, cursor_key = %keys.cursor))]
    pub fn set_keys(&mut self, keys: HistoryKeys) {
        self.history.remove_entry(&mut self.store);
        self.cursor.remove_entry(&mut self.store);
        self.history.rekey(&mut self.store, keys.history);
        self.cursor.rekey(&mut self.store, keys.cursor);
        info!("Storage keys changed");
    }

    /// Registers a callback run after every mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(HistoryView<'_>) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Consumes the game, returning the backing store.
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S> GameHistoryStore<S> {
    /// The snapshot under the cursor.
    pub fn current_board(&self) -> &Board {
        &self.history.get()[*self.cursor.get()]
    }

    /// Status of the current snapshot.
    pub fn status(&self) -> GameStatus {
        rules::status(self.current_board())
    }

    /// All snapshots, oldest first.
    pub fn history(&self) -> &[Board] {
        self.history.get()
    }

    /// Index of the current snapshot.
    pub fn cursor(&self) -> usize {
        *self.cursor.get()
    }

    /// Read-only view of history and cursor together.
    pub fn view(&self) -> HistoryView<'_> {
        HistoryView::new(self.history.get(), *self.cursor.get())
    }

    /// The move list, one entry per snapshot.
    pub fn moves(&self) -> Vec<MoveEntry> {
        let cursor = *self.cursor.get();
        (0..self.history.get().len())
            .map(|index| MoveEntry::new(index, index == cursor))
            .collect()
    }

    /// Storage keys currently in use.
    pub fn keys(&self) -> HistoryKeys {
        HistoryKeys {
            history: self.history.key().to_string(),
            cursor: self.cursor.key().to_string(),
        }
    }

    fn after_mutation(&mut self) {
        self.debug_check();
        let view = HistoryView::new(self.history.get(), *self.cursor.get());
        for subscriber in &mut self.subscribers {
            subscriber(view);
        }
    }

    #[cfg(debug_assertions)]
    fn debug_check(&self) {
        if let Err(violations) = HistoryInvariants::check_all(&self.view()) {
            panic!("History invariants violated: {:?}", violations);
        }
    }

    #[cfg(not(debug_assertions))]
    fn debug_check(&self) {}
}

impl<S> std::fmt::Debug for GameHistoryStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameHistoryStore")
            .field("history", &self.history)
            .field("cursor", &self.cursor)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

fn initial_history() -> Vec<Board> {
    vec![Board::new()]
}
