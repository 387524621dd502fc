//! Command-line interface for tictactoe_history.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe with a persisted, rewindable move history
#[derive(Parser, Debug)]
#[command(name = "tictactoe_history")]
#[command(about = "Play tic-tac-toe one command at a time", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file (defaults to $TICTACTOE_CONFIG, then built-in defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overriding the config
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current board and status
    Show,

    /// Place the next mark
    Move {
        /// Square index (0-8) or label such as "center" or "top-left"
        square: String,
    },

    /// Jump to an earlier (or later) snapshot in the history
    Jump {
        /// Move number; 0 is the game start
        index: usize,
    },

    /// Start a new game
    Restart,

    /// List the moves you can jump to
    Moves,
}
