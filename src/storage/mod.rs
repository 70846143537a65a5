//! Storage module for the deduplication seen-set
//!
//! This module handles:
//! - SQLite database initialization and schema management
//! - Recording which URL hashes have already been scheduled

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteSeenStore;
pub use traits::{SeenStore, StorageError, StorageResult};

use crate::config::SeencheckConfig;
use std::path::Path;

/// Opens the seen-set described by the configuration
///
/// A configured database path opens (or creates) a file-backed store;
/// otherwise the store lives in memory for the duration of the crawl.
pub fn open_seen_store(config: &SeencheckConfig) -> StorageResult<SqliteSeenStore> {
    match &config.database_path {
        Some(path) => SqliteSeenStore::new(Path::new(path)),
        None => SqliteSeenStore::in_memory(),
    }
}
