use crate::url::host_with_port;
use url::Url;

/// Checks if a host matches a pattern
///
/// A plain pattern matches only the same host. A `*.` pattern matches the
/// base domain and every subdomain below it.
///
/// ```
/// use sumi_capture::url::matches_wildcard;
///
/// assert!(matches_wildcard("example.com", "example.com"));
/// assert!(matches_wildcard("*.example.com", "example.com"));
/// assert!(matches_wildcard("*.example.com", "api.v2.example.com"));
/// assert!(!matches_wildcard("*.example.com", "example.org"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        candidate == pattern
    }
}

/// Returns true if the host matches any pattern in the list
///
/// Used for the outlink include/exclude host filters.
pub fn matches_any(patterns: &[String], host: &str) -> bool {
    patterns.iter().any(|p| matches_wildcard(p, host))
}

/// Returns true if requests to `url` must skip the proxy
///
/// A plain entry bypasses every authority containing it. The authority is
/// the host plus any explicit port, so `example.org` covers
/// `cdn.example.org:8443` and `127.0.0.1:8080` covers only that port.
/// A `*.` entry is matched against the host alone.
///
/// ```
/// use sumi_capture::url::bypasses_proxy;
/// use url::Url;
///
/// let bypass = vec!["example.org".to_string(), "127.0.0.1:8080".to_string()];
/// assert!(bypasses_proxy(&bypass, &Url::parse("https://cdn.example.org:8443/").unwrap()));
/// assert!(bypasses_proxy(&bypass, &Url::parse("http://127.0.0.1:8080/").unwrap()));
/// assert!(!bypasses_proxy(&bypass, &Url::parse("http://127.0.0.1:9090/").unwrap()));
/// ```
pub fn bypasses_proxy(bypass: &[String], url: &Url) -> bool {
    let host = url.host_str().unwrap_or("");
    let authority = host_with_port(url);

    bypass.iter().any(|entry| {
        if entry.starts_with("*.") {
            matches_wildcard(entry, host)
        } else {
            !entry.is_empty() && authority.contains(entry.as_str())
        }
    })
}
