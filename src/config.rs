//! Configuration for where and how a game is persisted.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::games::tictactoe::{DEFAULT_CURSOR_KEY, DEFAULT_HISTORY_KEY, HistoryKeys};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "TICTACTOE_CONFIG";

/// Storage configuration, normally read from a TOML file.
///
/// Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
pub struct HistoryConfig {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Storage key for the board snapshots.
    #[serde(default = "default_history_key")]
    history_key: String,

    /// Storage key for the cursor.
    #[serde(default = "default_cursor_key")]
    cursor_key: String,
}

#[instrument]
fn default_db_path() -> String {
    "tictactoe_history.db".to_string()
}

#[instrument]
fn default_history_key() -> String {
    DEFAULT_HISTORY_KEY.to_string()
}

#[instrument]
fn default_cursor_key() -> String {
    DEFAULT_CURSOR_KEY.to_string()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            history_key: default_history_key(),
            cursor_key: default_cursor_key(),
        }
    }
}

impl HistoryConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// Rejects a file that gives the history and cursor the same key.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.keys()?;
        Ok(config)
    }

    /// Resolves the configuration for a run.
    ///
    /// An explicit path wins, then the file named by [`CONFIG_ENV_VAR`];
    /// with neither, defaults are used.
    #[instrument]
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Storage keys described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the history and cursor keys are equal.
    pub fn keys(&self) -> Result<HistoryKeys, ConfigError> {
        HistoryKeys::new(self.history_key.as_str(), self.cursor_key.as_str())
            .map_err(|e| ConfigError::new(format!("Invalid storage keys: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
