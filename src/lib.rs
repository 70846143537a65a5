//! Sumi-Capture: the capture engine of an archiving web crawler
//!
//! Given a discovered URL, this crate fetches it, archives the raw exchange,
//! follows redirects under a bounded budget, parses the result for further
//! links, and schedules the capture of outlinks and assets.

pub mod archive;
pub mod config;
pub mod crawler;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Capture operations
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Failed to build request for {url}: {message}")]
    RequestBuild { url: String, message: String },

    #[error("Invalid redirect location '{location}': {source}")]
    RedirectLocation {
        location: String,
        source: ::url::ParseError,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] archive::ArchiveError),

    #[error("Failed to read document {path}: {source}")]
    DocumentRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to decode {encoding} body of {url}: {source}")]
    BodyDecode {
        url: String,
        encoding: String,
        source: std::io::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),
}

impl CaptureError {
    /// Returns true for connection, TLS and timeout failures
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid host pattern: {0}")]
    InvalidPattern(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Sumi-Capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use archive::{delete_temp_file, TempArtifact};
pub use config::Config;
pub use crawler::{CaptureItem, CrawlContext, ItemType};
