//! Local storage layer.
//!
//! The portal persists exactly two values between runs: the logged-in user
//! and the active clinic. They live in a string key/value store, backed by
//! SQLite on disk or by a plain map in memory.

mod schema;
mod local_storage;
mod memory;

pub use schema::*;
pub use memory::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// String key/value store with browser local-storage semantics.
///
/// `set_item` overwrites, `remove_item` on a missing key is a no-op.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> DbResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> DbResult<()>;

    fn remove_item(&mut self, key: &str) -> DbResult<()>;
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
