//! Archival of HTTP exchanges
//!
//! This module contains:
//! - The `Archiver` interface the Fetch Executor writes every exchange through
//! - `SpoolArchiver`, a plain-text exchange recorder
//! - The temporary artifact lifecycle (`TempArtifact`, `delete_temp_file`)

mod artifact;
mod spool;

pub use artifact::{delete_temp_file, TempArtifact};
pub use spool::SpoolArchiver;

use crate::crawler::CapturedResponse;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while archiving an exchange
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist temporary file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Archive task failed: {0}")]
    Task(String),
}

/// Durable store for HTTP exchanges
///
/// Implementations record the full exchange and return a handle to a
/// temporary copy of the response body, which the caller owns.
#[async_trait]
pub trait Archiver: Send + Sync {
    async fn archive(&self, response: &CapturedResponse) -> Result<TempArtifact, ArchiveError>;
}
