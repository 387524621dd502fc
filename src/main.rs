//! tictactoe_history - one-shot CLI over a persisted game.

#![warn(missing_docs)]

mod cli;

use anyhow::{Result, anyhow};
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_history::{GameHistoryStore, HistoryConfig, KeyValueStore, Position, SqliteStore};
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed arguments");

    let mut config = HistoryConfig::resolve(cli.config.as_deref())?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }

    let store = SqliteStore::open(config.db_path())?;
    debug!(db_path = store.db_path(), "Store ready");
    let mut game = GameHistoryStore::open_with_keys(store, config.keys()?);

    match cli.command {
        Command::Show => print_game(&game),
        Command::Move { square } => play(&mut game, &square)?,
        Command::Jump { index } => {
            game.select_move(index)?;
            print_game(&game);
        }
        Command::Restart => {
            game.restart();
            print_game(&game);
        }
        Command::Moves => {
            for entry in game.moves() {
                println!("{:>2}. {}", entry.index(), entry);
            }
        }
    }

    Ok(())
}

/// Parses `square` and plays it, reporting ignored moves.
#[instrument(skip(game))]
fn play<S: KeyValueStore>(game: &mut GameHistoryStore<S>, square: &str) -> Result<()> {
    let position = Position::from_label_or_number(square)
        .ok_or_else(|| anyhow!("Unknown square '{}': use 0-8 or a label like 'center'", square))?;
    let outcome = game.select_square(position);
    println!("{}", outcome);
    print_game(game);
    Ok(())
}

fn print_game<S>(game: &GameHistoryStore<S>) {
    println!("{}", game.current_board().display());
    println!();
    println!("Move {} of {}", game.cursor(), game.history().len() - 1);
    println!("{}", game.status());

    let open = Position::valid_moves(game.current_board());
    if !game.status().is_over() {
        let labels: Vec<&str> = open.iter().map(Position::label).collect();
        println!("Open: {}", labels.join(", "));
    }
}
