//! Crawler coordinator - worker pool that drains the frontier
//!
//! This module contains the main crawl loop, which:
//! - Seeds the frontier from the configuration
//! - Dispatches queued items to concurrent capture tasks
//! - Stops scheduling once the crawl time limit is reached
//! - Reports the final statistics

use crate::config::Config;
use crate::crawler::capture::CaptureOutcome;
use crate::crawler::context::CrawlContext;
use crate::crawler::frontier::FrontierReceiver;
use crate::crawler::item::CaptureItem;
use crate::url::parse_capture_url;
use crate::CaptureError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Statistics of a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Seeds accepted into the frontier
    pub seeds_queued: usize,
    /// Page captures that ran to a terminal state
    pub pages_processed: usize,
    /// Page captures whose fetch failed
    pub fetch_failures: usize,
    /// Exchanges written to the archive
    pub archived: i64,
    pub crawled_seeds: i64,
    pub crawled_pages: i64,
    pub crawled_assets: i64,
    /// True when the crawl stopped on its time limit
    pub time_limit_reached: bool,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    ctx: Arc<CrawlContext>,
    receiver: FrontierReceiver,
    semaphore: Arc<Semaphore>,
    time_limit: Option<Duration>,
}

impl Coordinator {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `ctx` - The shared crawl context
    /// * `receiver` - Receiving half of the context's frontier
    /// * `workers` - Maximum number of concurrent page captures
    /// * `time_limit` - Stop scheduling new items after this long
    pub fn new(
        ctx: Arc<CrawlContext>,
        receiver: FrontierReceiver,
        workers: usize,
        time_limit: Option<Duration>,
    ) -> Self {
        Self {
            ctx,
            receiver,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
            time_limit,
        }
    }

    /// Runs the main crawl loop
    ///
    /// The loop ends when the frontier is empty and no capture is in
    /// flight. Once the time limit is reached, queued items are dropped and
    /// in-flight captures are allowed to finish.
    pub async fn run(mut self) -> CrawlSummary {
        let start = Instant::now();
        let deadline = self
            .time_limit
            .map(|limit| tokio::time::Instant::now() + limit);

        let mut tasks: JoinSet<CaptureOutcome> = JoinSet::new();
        let mut summary = CrawlSummary::default();
        let mut stopped = false;

        loop {
            let idle = tasks.is_empty();
            if idle && (stopped || self.ctx.stats.queued.value() <= 0) {
                break;
            }

            let can_dispatch = !stopped && self.semaphore.available_permits() > 0;

            tokio::select! {
                Some(joined) = tasks.join_next(), if !idle => {
                    self.ctx.stats.active_workers.decr();
                    summary.pages_processed += 1;

                    match joined {
                        Ok(CaptureOutcome::FetchFailed) => summary.fetch_failures += 1,
                        Ok(_) => {}
                        Err(e) => {
                            summary.fetch_failures += 1;
                            tracing::error!("Capture task failed: {}", e);
                        }
                    }

                    if summary.pages_processed % 10 == 0 {
                        tracing::info!(
                            "Progress: {} pages processed, {} queued, {} active, {} URI/s",
                            summary.pages_processed,
                            self.ctx.stats.queued.value(),
                            self.ctx.stats.active_workers.value(),
                            self.ctx.stats.uris_per_second.rate()
                        );
                    }
                }

                Some(item) = self.receiver.recv(), if can_dispatch => {
                    self.ctx.stats.queued.decr();

                    let permit = match Arc::clone(&self.semaphore).acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => break,
                    };

                    self.ctx.stats.active_workers.incr();
                    let ctx = Arc::clone(&self.ctx);
                    tasks.spawn(async move {
                        let outcome = ctx.capture_page(item).await;
                        drop(permit);
                        outcome
                    });
                }

                _ = sleep_until(deadline), if !stopped && deadline.is_some() => {
                    stopped = true;
                    summary.time_limit_reached = true;

                    self.receiver.close();
                    let mut dropped = 0;
                    while self.receiver.try_recv().is_some() {
                        self.ctx.stats.queued.decr();
                        dropped += 1;
                    }

                    tracing::info!(
                        "Crawl time limit reached after {:?}, dropped {} queued items",
                        start.elapsed(),
                        dropped
                    );
                }

                else => break,
            }
        }

        summary.archived = self.ctx.stats.crawled.value();
        summary.crawled_seeds = self.ctx.stats.crawled_seeds.value();
        summary.crawled_pages = self.ctx.stats.crawled_pages.value();
        summary.crawled_assets = self.ctx.stats.crawled_assets.value();

        tracing::info!(
            pages = summary.pages_processed,
            failures = summary.fetch_failures,
            archived = summary.archived,
            seeds = summary.crawled_seeds,
            assets = summary.crawled_assets,
            "Crawl completed in {:?}",
            start.elapsed()
        );

        summary
    }
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Runs the main crawl operation
///
/// This function orchestrates the entire crawl process:
///
/// 1. Build the crawl context (clients, archiver, seen-set, frontier)
/// 2. Queue every configured seed
/// 3. Drain the frontier with the worker pool
/// 4. Return the final statistics
///
/// # Example
///
/// ```no_run
/// use sumi_capture::config::load_config;
/// use sumi_capture::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let summary = run_crawl(&config).await?;
/// println!("{} pages processed", summary.pages_processed);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlSummary, CaptureError> {
    let (ctx, receiver) = CrawlContext::from_config(config)?;

    let mut seeds_queued = 0;
    for seed in &config.seeds {
        let url = parse_capture_url(seed)?;
        if ctx.enqueue(CaptureItem::seed(url)) {
            seeds_queued += 1;
        } else {
            tracing::debug!("Seed not queued: {}", seed);
        }
    }
    tracing::info!("Queued {} seeds", seeds_queued);

    let time_limit = match config.crawler.crawl_time_limit {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let coordinator = Coordinator::new(ctx, receiver, config.crawler.workers as usize, time_limit);
    let mut summary = coordinator.run().await;
    summary.seeds_queued = seeds_queued;

    Ok(summary)
}
