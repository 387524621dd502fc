//! SQLite persistence for key-value entries.

mod error;
mod models;
mod schema; // Diesel generated schema - internal use only
mod store;

pub use error::{DbError, DbOperation};
pub use models::KvEntry;
pub use store::SqliteStore;
