//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a board snapshot
//! according to tic-tac-toe rules. Nothing here is stored; every answer
//! is recomputed from the squares.

pub mod draw;
pub mod status;
pub mod turn;
pub mod win;

pub use draw::{is_draw, is_full};
pub use status::{GameStatus, status};
pub use turn::next_player;
pub use win::check_winner;
