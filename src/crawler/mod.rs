//! Crawler module for capturing pages and their resources
//!
//! This module contains the core capture logic, including:
//! - HTTP fetching with archival and bounded redirect following
//! - Asset capture with deduplication
//! - HTML parsing and outlink/asset extraction
//! - The frontier and the worker pool that drains it

mod asset;
mod capture;
mod context;
mod coordinator;
mod fetcher;
mod frontier;
mod item;
mod parser;
mod response;
mod stats;

pub use capture::CaptureOutcome;
pub use context::{CaptureSettings, CrawlContext};
pub use coordinator::{run_crawl, Coordinator, CrawlSummary};
pub use fetcher::{build_get, build_http_client, Fetched, HttpClients};
pub use frontier::{channel as frontier_channel, Frontier, FrontierReceiver};
pub use item::{CaptureItem, ItemType};
pub use parser::{extract_assets, extract_outlinks, Document};
pub use response::{cookie_header, is_redirection, CapturedResponse, Cookie};
pub use stats::{Counter, CrawlStats, RateCounter};
