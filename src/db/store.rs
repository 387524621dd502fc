//! Key-value store backed by an SQLite table.

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::models::NewKvEntry;
use crate::db::{DbError, DbOperation, KvEntry, schema};
use crate::persist::{KeyValueStore, StoreError};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// [`KeyValueStore`] persisting entries in the `kv_entries` table.
///
/// Holds a single open connection, so `":memory:"` works and lives as long
/// as the store does.
pub struct SqliteStore {
    db_path: String,
    conn: SqliteConnection,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and applies migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, DbError> {
        let db_path = db_path.as_ref().to_string();
        debug!("Establishing connection");
        let mut conn = SqliteConnection::establish(&db_path)
            .map_err(|e| {
                DbError::new(
                    DbOperation::Open,
                    format!("Failed to connect to '{}': {}", db_path, e),
                )
            })?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| {
                DbError::new(DbOperation::Migrate, format!("Migrations failed: {}", e))
            })?;
        info!(path = %db_path, migrations = applied.len(), "SqliteStore opened");

        Ok(Self { db_path, conn })
    }

    /// Path the store was opened with.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Reads the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_value(&mut self, key: &str) -> Result<Option<String>, DbError> {
        let value = schema::kv_entries::table
            .find(key)
            .select(schema::kv_entries::value)
            .first::<String>(&mut self.conn)
            .optional()
            .map_err(|e| DbError::query(DbOperation::Get, key, e))?;
        debug!(found = value.is_some(), "Entry looked up");
        Ok(value)
    }

    /// Inserts or replaces the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, value), fields(len = value.len()))]
    pub fn put_value(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        let entry = NewKvEntry::new(key, value, Utc::now().naive_utc());
        diesel::replace_into(schema::kv_entries::table)
            .values(&entry)
            .execute(&mut self.conn)
            .map_err(|e| DbError::query(DbOperation::Put, key, e))?;
        debug!("Entry written");
        Ok(())
    }

    /// Deletes the entry under `key`, returning whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_value(&mut self, key: &str) -> Result<bool, DbError> {
        let deleted = diesel::delete(schema::kv_entries::table.find(key))
            .execute(&mut self.conn)
            .map_err(|e| DbError::query(DbOperation::Delete, key, e))?;
        debug!(deleted, "Entry deleted");
        Ok(deleted > 0)
    }

    /// Lists all entries ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn entries(&mut self) -> Result<Vec<KvEntry>, DbError> {
        let entries = schema::kv_entries::table
            .order(schema::kv_entries::key.asc())
            .select(KvEntry::as_select())
            .load(&mut self.conn)
            .map_err(|e| DbError::new(DbOperation::List, format!("Diesel error: {}", e)))?;
        debug!(count = entries.len(), "Entries loaded");
        Ok(entries)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get_value(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.put_value(key, value)?)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.delete_value(key)?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}
