//! Temporary artifact lifecycle
//!
//! Every archived exchange leaves a temporary copy of the response body on
//! disk. The artifact directory is bounded by free disk space, so each copy
//! must be removed exactly once on every exit path.

use std::path::{Path, PathBuf};

/// Deletes a temporary file if a path is given
///
/// An absent or empty path is a no-op. A failed deletion is logged with the
/// path and the underlying error and never returned to the caller.
pub fn delete_temp_file(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };

    if path.as_os_str().is_empty() {
        return;
    }

    if let Err(e) = std::fs::remove_file(path) {
        tracing::warn!(
            error = %e,
            path = %path.display(),
            "Error deleting temporary file"
        );
    }
}

/// Handle to the on-disk copy of an archived response
///
/// Empty when archival is disabled. The file is deleted by [`TempArtifact::delete`]
/// or, failing that, when the handle is dropped.
#[derive(Debug, Default)]
pub struct TempArtifact {
    path: Option<PathBuf>,
}

impl TempArtifact {
    /// Creates a handle owning the file at `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Creates a handle that owns nothing
    pub fn empty() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_none()
    }

    /// Deletes the underlying file now
    pub fn delete(mut self) {
        delete_temp_file(self.path.take().as_deref());
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        delete_temp_file(self.path.take().as_deref());
    }
}
