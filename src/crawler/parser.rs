//! HTML parser for extracting outlinks and assets
//!
//! This module handles parsing captured documents to extract:
//! - Outlinks to schedule as pages (from <a>, <area> and alternate links)
//! - Assets to capture alongside the page (images, scripts, styles, media)
//! - The page title, for logging
//!
//! `scraper::Html` is not `Send`, so a `Document` must be created, queried
//! and dropped without holding it across an `.await`.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// `rel` values of `<link>` elements that point at assets
const ASSET_LINK_RELS: &[&str] = &[
    "stylesheet",
    "icon",
    "shortcut",
    "apple-touch-icon",
    "preload",
    "prefetch",
    "modulepreload",
    "manifest",
];

/// Asset sources: tag name, selector and the attributes holding URLs
const ASSET_SOURCES: &[(&str, &str, &[&str])] = &[
    ("img", "img", &["src", "data-src", "srcset"]),
    ("script", "script[src]", &["src"]),
    ("link", "link[href]", &["href"]),
    ("source", "source", &["src", "srcset"]),
    ("video", "video", &["src", "poster"]),
    ("audio", "audio[src]", &["src"]),
    ("embed", "embed[src]", &["src"]),
    ("iframe", "iframe[src]", &["src"]),
];

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses raw document bytes
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected, and the
    /// HTML parser itself never fails.
    pub fn parse(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        Self {
            html: Html::parse_document(&text),
        }
    }

    /// Extracts the page title from the `<title>` tag
    pub fn title(&self) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;

        self.html
            .select(&title_selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Extracts all outlinks from a document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` and `<area href="...">`
/// - `<link rel="alternate" href="...">` when `capture_alternate_pages` is set
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs and fragment-only links
/// - Anything that is not HTTP(S) after resolution
///
/// # Example
///
/// ```
/// use sumi_capture::crawler::{extract_outlinks, Document};
/// use url::Url;
///
/// let doc = Document::parse(br#"<html><body><a href="/page">Link</a></body></html>"#);
/// let base = Url::parse("https://example.com/").unwrap();
/// let links = extract_outlinks(&base, &doc, false);
/// assert_eq!(links[0].as_str(), "https://example.com/page");
/// ```
pub fn extract_outlinks(base_url: &Url, document: &Document, capture_alternate_pages: bool) -> Vec<Url> {
    let mut links = LinkSet::default();

    if let Ok(selector) = Selector::parse("a[href], area[href]") {
        for element in document.html.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(resolve_link(href, base_url));
            }
        }
    }

    if capture_alternate_pages {
        if let Ok(selector) = Selector::parse("link[href]") {
            for element in document.html.select(&selector) {
                if has_rel(&element, &["alternate"]) {
                    if let Some(href) = element.value().attr("href") {
                        links.push(resolve_link(href, base_url));
                    }
                }
            }
        }
    }

    links.into_vec()
}

/// Extracts all asset URLs from a document
///
/// Tags listed in `disabled_tags` (lowercase) are skipped entirely. For
/// `srcset` attributes, every candidate URL is kept.
pub fn extract_assets(base_url: &Url, document: &Document, disabled_tags: &[String]) -> Vec<Url> {
    let mut assets = LinkSet::default();

    for (tag, selector, attrs) in ASSET_SOURCES {
        if disabled_tags.iter().any(|t| t == tag) {
            continue;
        }

        let Ok(selector) = Selector::parse(selector) else {
            continue;
        };

        for element in document.html.select(&selector) {
            if *tag == "link" && !has_rel(&element, ASSET_LINK_RELS) {
                continue;
            }

            for attr in attrs.iter() {
                let Some(value) = element.value().attr(attr) else {
                    continue;
                };

                if *attr == "srcset" {
                    for candidate in parse_srcset(value) {
                        assets.push(resolve_link(candidate, base_url));
                    }
                } else {
                    assets.push(resolve_link(value, base_url));
                }
            }
        }
    }

    assets.into_vec()
}

/// Returns true when the element's `rel` attribute contains one of `rels`
fn has_rel(element: &ElementRef<'_>, rels: &[&str]) -> bool {
    element
        .value()
        .attr("rel")
        .map(|rel| {
            rel.split_ascii_whitespace()
                .any(|token| rels.iter().any(|r| token.eq_ignore_ascii_case(r)))
        })
        .unwrap_or(false)
}

/// Splits a `srcset` value into its candidate URLs
fn parse_srcset(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .filter_map(|candidate| candidate.split_ascii_whitespace().next())
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => Some(absolute_url),
        _ => None,
    }
}

/// Ordered set of resolved links
#[derive(Default)]
struct LinkSet {
    seen: HashSet<String>,
    links: Vec<Url>,
}

impl LinkSet {
    fn push(&mut self, link: Option<Url>) {
        if let Some(link) = link {
            if self.seen.insert(link.as_str().to_string()) {
                self.links.push(link);
            }
        }
    }

    fn into_vec(self) -> Vec<Url> {
        self.links
    }
}
