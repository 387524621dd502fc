//! SQLite store error types.

use derive_more::Error;
use tracing::instrument;

/// Store operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum DbOperation {
    /// Opening the database file.
    Open,
    /// Applying embedded migrations.
    Migrate,
    /// Reading one entry.
    Get,
    /// Inserting or replacing one entry.
    Put,
    /// Deleting one entry.
    Delete,
    /// Listing all entries.
    List,
}

/// [`SqliteStore`](super::SqliteStore) failure, naming the operation and key involved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct DbError {
    /// Operation that failed.
    pub operation: DbOperation,
    /// Entry key, for single-entry operations.
    pub key: Option<String>,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error for `operation` with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(operation: DbOperation, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            operation,
            key: None,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Attaches the key of the entry being accessed.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Wraps a diesel query error for a single-entry operation.
    #[track_caller]
    pub fn query(operation: DbOperation, key: &str, err: diesel::result::Error) -> Self {
        Self::new(operation, format!("Diesel error: {}", err)).with_key(key)
    }
}

impl std::fmt::Display for DbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Database {} failed", self.operation)?;
        if let Some(key) = &self.key {
            write!(f, " for key '{}'", key)?;
        }
        write!(f, ": {} at {}:{}", self.message, self.file, self.line)
    }
}
