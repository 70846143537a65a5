use crate::UrlError;
use sha2::{Digest, Sha256};
use url::Url;

/// Parses a URL that can be captured
///
/// Only HTTP and HTTPS URLs with a host are accepted.
///
/// # Examples
///
/// ```
/// use sumi_capture::url::parse_capture_url;
///
/// assert!(parse_capture_url("https://example.com/page").is_ok());
/// assert!(parse_capture_url("mailto:someone@example.com").is_err());
/// ```
pub fn parse_capture_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    ensure_capturable(&url)?;
    Ok(url)
}

/// Checks that a URL uses HTTP(S) and has a host
pub fn ensure_capturable(url: &Url) -> Result<(), UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(())
}

/// Returns the URL used as the dedup identity of a capture
///
/// The fragment never reaches the server, so two URLs differing only in
/// their fragment name the same resource. Everything else is kept as-is:
/// archived captures must reflect the exact URL that was requested.
pub fn canonical_url(url: &Url) -> Url {
    let mut canonical = url.clone();
    canonical.set_fragment(None);
    canonical
}

/// Computes the dedup hash of a URL (hex-encoded SHA-256 of its canonical form)
pub fn dedup_hash(url: &Url) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_url(url).as_str().as_bytes());
    hex::encode(hasher.finalize())
}
