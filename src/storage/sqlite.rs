//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the SeenStore trait.

use crate::crawler::ItemType;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{SeenStore, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// SQLite seen-set backend
pub struct SqliteSeenStore {
    conn: Mutex<Connection>,
}

impl SqliteSeenStore {
    /// Opens or creates a seen-set database at `path`
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory seen-set, lost when the process exits
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SeenStore for SqliteSeenStore {
    fn is_seen(&self, key: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn()
            .query_row("SELECT 1 FROM seen WHERE hash = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn mark_seen(&self, key: &str, item_type: ItemType) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn().execute(
            "INSERT OR REPLACE INTO seen (hash, item_type, seen_at) VALUES (?1, ?2, ?3)",
            params![key, item_type.to_db_string(), now],
        )?;
        Ok(())
    }

    fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM seen", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
