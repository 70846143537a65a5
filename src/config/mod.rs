//! Configuration module for Sumi-Capture
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sumi_capture::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("capture.toml")).unwrap();
//! println!("Following at most {} redirects", config.crawler.max_redirect);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ArchiveConfig, Config, CrawlerConfig, ProxyConfig, SeencheckConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
