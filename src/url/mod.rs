//! URL handling module for Sumi-Capture
//!
//! This module provides the dedup identity of captured URLs and the host
//! matching used for proxy bypass and outlink filtering.

mod matcher;
mod normalize;

pub use matcher::{bypasses_proxy, matches_any, matches_wildcard};
pub use normalize::{canonical_url, dedup_hash, ensure_capturable, parse_capture_url};

use url::Url;

/// Returns the host of a URL followed by its explicit port, if any
///
/// ```
/// use url::Url;
/// use sumi_capture::url::host_with_port;
///
/// let url = Url::parse("http://127.0.0.1:8080/path").unwrap();
/// assert_eq!(host_with_port(&url), "127.0.0.1:8080");
/// ```
pub fn host_with_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
