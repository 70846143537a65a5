//! Page Capture Orchestrator
//!
//! Fetches one page, and when it is a textual document, schedules its
//! outlinks through the frontier and captures its assets in order.

use crate::archive::TempArtifact;
use crate::crawler::context::CrawlContext;
use crate::crawler::fetcher::{build_get, set_header};
use crate::crawler::item::{CaptureItem, ItemType};
use crate::crawler::parser::{extract_assets, extract_outlinks, Document};
use crate::crawler::response::{decode_body, CapturedResponse};
use crate::url::matches_any;
use crate::CaptureError;
use reqwest::header::REFERER;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Terminal state of one page capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The request chain failed; nothing was parsed
    FetchFailed,
    /// The final response was not textual
    ContentTypeRejected { status: StatusCode },
    /// The document could not be read back or decoded
    ParseFailed,
    /// The document was parsed and its links processed
    Parsed {
        redirects: u32,
        outlinks_queued: usize,
        assets_captured: usize,
        assets_failed: usize,
        /// Assets equal to the page URL
        assets_skipped: usize,
    },
}

impl CrawlContext {
    /// Captures one page and expands its outlinks and assets
    ///
    /// Errors are logged and end the processing of this item only.
    pub async fn capture_page(&self, item: Arc<CaptureItem>) -> CaptureOutcome {
        let start = Instant::now();

        let request = match self.page_request(&item) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, url = %item.url(), "Failed to build request");
                return CaptureOutcome::FetchFailed;
            }
        };

        let fetched = match self.execute_get(Arc::clone(&item), request).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    hop = item.hop(),
                    item_type = %item.item_type(),
                    url = %item.url(),
                    "Capture failed"
                );
                return CaptureOutcome::FetchFailed;
            }
        };

        self.log_crawl_success(start, fetched.response.status, &item);

        let mut response = fetched.response;
        if !response.is_text() {
            tracing::debug!(
                content_type = response.content_type(),
                "Not parsing non-text response: {}",
                response.url
            );
            fetched.artifact.delete();
            return CaptureOutcome::ContentTypeRejected {
                status: response.status,
            };
        }

        let body = match read_body(fetched.artifact, &mut response).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, url = %response.url, "Failed to parse document");
                return CaptureOutcome::ParseFailed;
            }
        };

        let base_url = response.url.clone();
        let (outlinks, assets) = self.extract_links(&item, &base_url, &body);

        let mut outlinks_queued = 0;
        for outlink in outlinks {
            let child = CaptureItem::new(
                outlink,
                Some(Arc::clone(&item)),
                ItemType::Page,
                item.hop() + 1,
            );
            if self.enqueue(child) {
                outlinks_queued += 1;
            }
        }

        let mut assets_captured = 0;
        let mut assets_failed = 0;
        let mut assets_skipped = 0;

        self.stats.queued.add(assets.len() as i64);
        for asset in assets {
            self.stats.queued.decr();

            if &asset == item.url() || asset == response.url {
                assets_skipped += 1;
                continue;
            }

            let asset_item = Arc::new(CaptureItem::new(
                asset,
                Some(Arc::clone(&item)),
                ItemType::Asset,
                item.hop(),
            ));

            match self.capture_asset(Arc::clone(&asset_item), &response.cookies).await {
                Ok(()) => assets_captured += 1,
                Err(e) => {
                    assets_failed += 1;
                    tracing::warn!(
                        error = %e,
                        queued = self.stats.queued.value(),
                        crawled = self.stats.crawled.value(),
                        rate = self.stats.uris_per_second.rate() as u64,
                        active_workers = self.stats.active_workers.value(),
                        parent_hop = item.hop(),
                        parent_url = %item.url(),
                        item_type = "asset",
                        url = %asset_item.url(),
                        "Error while capturing asset"
                    );
                }
            }
        }

        CaptureOutcome::Parsed {
            redirects: fetched.redirects,
            outlinks_queued,
            assets_captured,
            assets_failed,
            assets_skipped,
        }
    }

    /// Schedules an item through the frontier
    ///
    /// Non-seed items are subject to the host filters. With seencheck
    /// enabled, an item whose hash was already seen is dropped. Returns true
    /// when the item was queued.
    pub fn enqueue(&self, item: CaptureItem) -> bool {
        if item.item_type() != ItemType::Seed && !self.host_allowed(item.url()) {
            tracing::debug!("Host filtered out: {}", item.url());
            return false;
        }

        if self.settings.seencheck && !self.check_and_mark_seen(&item) {
            return false;
        }

        self.stats.queued.incr();
        if self.frontier.push(Arc::new(item)) {
            true
        } else {
            self.stats.queued.decr();
            false
        }
    }

    fn host_allowed(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");

        if matches_any(&self.settings.exclude_hosts, host) {
            return false;
        }

        self.settings.include_hosts.is_empty() || matches_any(&self.settings.include_hosts, host)
    }

    /// Builds the first request for a page; seeds carry no referer
    fn page_request(&self, item: &CaptureItem) -> Result<reqwest::Request, CaptureError> {
        let mut request = build_get(item.url());
        if item.hop() > 0 {
            if let Some(parent_url) = item.parent_url() {
                set_header(&mut request, REFERER, parent_url.as_str())?;
            }
        }
        Ok(request)
    }

    /// Parses a document and extracts its links
    ///
    /// The parsed document stays inside this call.
    fn extract_links(&self, item: &CaptureItem, base_url: &Url, bytes: &[u8]) -> (Vec<Url>, Vec<Url>) {
        let document = Document::parse(bytes);

        if let Some(title) = document.title() {
            tracing::debug!(title = %title, "Parsed {}", base_url);
        }

        let outlinks = if item.hop() < self.settings.max_hops {
            extract_outlinks(base_url, &document, self.settings.capture_alternate_pages)
        } else {
            Vec::new()
        };

        let assets = if self.settings.disable_assets_capture {
            Vec::new()
        } else {
            extract_assets(base_url, &document, &self.settings.disabled_html_tags)
        };

        (outlinks, assets)
    }
}

/// Reads the body for parsing, preferring the archived copy
///
/// The artifact is deleted once read, or on failure. The bytes are then
/// decoded according to the response's Content-Encoding.
async fn read_body(
    artifact: TempArtifact,
    response: &mut CapturedResponse,
) -> Result<Vec<u8>, CaptureError> {
    let raw = match artifact.path().map(|p| p.to_path_buf()) {
        Some(path) => {
            let result = tokio::fs::read(&path).await;
            artifact.delete();
            result.map_err(|source| CaptureError::DocumentRead {
                path: path.display().to_string(),
                source,
            })?
        }
        None => std::mem::take(&mut response.body),
    };

    decode_body(raw, response.content_encoding()).map_err(|source| CaptureError::BodyDecode {
        url: response.url.to_string(),
        encoding: response.content_encoding().unwrap_or("").to_string(),
        source,
    })
}
