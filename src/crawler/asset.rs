//! Asset Capturer
//!
//! Assets are fetched and archived like pages, but never parsed.

use crate::crawler::context::CrawlContext;
use crate::crawler::fetcher::{build_get, set_header};
use crate::crawler::item::CaptureItem;
use crate::crawler::response::{cookie_header, Cookie};
use crate::CaptureError;
use reqwest::header::{COOKIE, REFERER};
use std::sync::Arc;
use std::time::Instant;

impl CrawlContext {
    /// Fetches and archives one asset
    ///
    /// With seencheck enabled, an asset whose hash was already seen returns
    /// `Ok` without any request. Otherwise it is marked seen before the
    /// fetch, so two racing captures of the same asset may both run.
    pub async fn capture_asset(
        &self,
        item: Arc<CaptureItem>,
        cookies: &[Cookie],
    ) -> Result<(), CaptureError> {
        let start = Instant::now();

        if self.settings.seencheck && !self.check_and_mark_seen(&item) {
            tracing::debug!("Asset already seen: {}", item.url());
            return Ok(());
        }

        let mut request = build_get(item.url());
        if let Some(parent_url) = item.parent_url() {
            set_header(&mut request, REFERER, parent_url.as_str())?;
        }
        if let Some(cookie) = cookie_header(cookies) {
            request.headers_mut().insert(COOKIE, cookie);
        }

        let fetched = self.execute_get(Arc::clone(&item), request).await?;
        fetched.artifact.delete();

        self.log_crawl_success(start, fetched.response.status, &item);
        Ok(())
    }

    /// Marks an item seen; returns false when it already was
    ///
    /// A seen-set failure is logged and treated as unseen so the capture
    /// still happens.
    pub(crate) fn check_and_mark_seen(&self, item: &CaptureItem) -> bool {
        match self.seen.is_seen(item.hash()) {
            Ok(true) => return false,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, url = %item.url(), "Seencheck lookup failed");
            }
        }

        if let Err(e) = self.seen.mark_seen(item.hash(), item.item_type()) {
            tracing::warn!(error = %e, url = %item.url(), "Failed to mark item as seen");
        }

        true
    }
}
