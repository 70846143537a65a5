//! Crawl context shared by every capture
//!
//! The context is built once at startup and shared by reference across all
//! concurrent captures. Its settings and clients are read-only; the only
//! mutable state is the atomic counters in [`CrawlStats`] and the seen-set.

use crate::archive::{Archiver, SpoolArchiver};
use crate::config::Config;
use crate::crawler::fetcher::HttpClients;
use crate::crawler::frontier::{self, Frontier, FrontierReceiver};
use crate::crawler::item::{CaptureItem, ItemType};
use crate::crawler::stats::CrawlStats;
use crate::storage::{open_seen_store, SeenStore};
use crate::CaptureError;
use reqwest::StatusCode;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Capture behavior derived from the configuration
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    pub max_hops: u32,
    pub max_redirect: u32,
    /// Carried for the layers above; the capture path never retries
    pub max_retry: u32,
    pub seencheck: bool,
    pub disable_assets_capture: bool,
    pub capture_alternate_pages: bool,
    pub disabled_html_tags: Vec<String>,
    pub exclude_hosts: Vec<String>,
    pub include_hosts: Vec<String>,
    pub user_agent: String,
}

impl CaptureSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_hops: config.crawler.max_hops,
            max_redirect: config.crawler.max_redirect,
            max_retry: config.crawler.max_retry,
            seencheck: config.crawler.seencheck,
            disable_assets_capture: config.crawler.disable_assets_capture,
            capture_alternate_pages: config.crawler.capture_alternate_pages,
            disabled_html_tags: config
                .crawler
                .disabled_html_tags
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
            exclude_hosts: config.crawler.exclude_hosts.clone(),
            include_hosts: config.crawler.include_hosts.clone(),
            user_agent: config.user_agent.header_value(),
        }
    }
}

/// Process-wide crawl state
pub struct CrawlContext {
    pub settings: CaptureSettings,
    pub clients: HttpClients,
    /// `None` when archival is disabled
    pub archiver: Option<Arc<dyn Archiver>>,
    pub seen: Arc<dyn SeenStore>,
    pub frontier: Frontier,
    pub stats: CrawlStats,
}

impl CrawlContext {
    pub fn new(
        settings: CaptureSettings,
        clients: HttpClients,
        archiver: Option<Arc<dyn Archiver>>,
        seen: Arc<dyn SeenStore>,
        frontier: Frontier,
    ) -> Self {
        Self {
            settings,
            clients,
            archiver,
            seen,
            frontier,
            stats: CrawlStats::new(),
        }
    }

    /// Builds a context and its frontier receiver from the configuration
    ///
    /// This creates the HTTP clients, opens the seen-set and, when archival
    /// is enabled, the spool archiver.
    pub fn from_config(config: &Config) -> Result<(Arc<Self>, FrontierReceiver), CaptureError> {
        let settings = CaptureSettings::from_config(config);
        let clients = HttpClients::from_config(config)?;

        let archiver: Option<Arc<dyn Archiver>> = if config.archive.enabled {
            Some(Arc::new(SpoolArchiver::new(
                Path::new(&config.archive.temp_dir),
                Path::new(&config.archive.output_dir),
            )?))
        } else {
            None
        };

        let seen: Arc<dyn SeenStore> = Arc::new(open_seen_store(&config.seencheck)?);
        let (frontier, receiver) = frontier::channel();

        tracing::info!(
            max_hops = settings.max_hops,
            max_redirect = settings.max_redirect,
            max_retry = settings.max_retry,
            seencheck = settings.seencheck,
            archive = archiver.is_some(),
            proxied = clients.is_proxied(),
            "Capture context ready"
        );

        let context = Self::new(settings, clients, archiver, seen, frontier);
        Ok((Arc::new(context), receiver))
    }

    /// Records a successful capture
    pub fn log_crawl_success(&self, start: Instant, status: StatusCode, item: &CaptureItem) {
        self.stats.uris_per_second.incr();

        match item.item_type() {
            ItemType::Seed => self.stats.crawled_seeds.incr(),
            ItemType::Page => self.stats.crawled_pages.incr(),
            ItemType::Asset => self.stats.crawled_assets.incr(),
        }

        tracing::info!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            hop = item.hop(),
            item_type = %item.item_type(),
            "{}",
            item.url()
        );
    }
}
