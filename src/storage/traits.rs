//! Storage traits and error types
//!
//! This module defines the seen-set interface used for deduplication and
//! its error type.

use crate::crawler::ItemType;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Seen-set keyed by an item's dedup hash
///
/// Implementations are shared by every concurrent capture. Check-then-mark is
/// not atomic across callers: two captures racing on the same key may both
/// fetch it.
pub trait SeenStore: Send + Sync {
    /// Returns true if the key has already been marked
    fn is_seen(&self, key: &str) -> StorageResult<bool>;

    /// Records the key together with the type of item it belongs to
    fn mark_seen(&self, key: &str, item_type: ItemType) -> StorageResult<()>;

    /// Number of keys recorded so far
    fn count(&self) -> StorageResult<u64>;
}
