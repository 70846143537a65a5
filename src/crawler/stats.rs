//! Shared crawl counters
//!
//! Every counter can be updated from any task without external locking.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Signed atomic counter
#[derive(Debug, Default)]
pub struct Counter(AtomicI64);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incr(&self) {
        self.add(1);
    }

    pub fn decr(&self) {
        self.add(-1);
    }

    pub fn add(&self, delta: i64) {
        self.0.fetch_add(delta, Ordering::SeqCst);
    }

    pub fn value(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Number of events recorded during the trailing window
#[derive(Debug)]
pub struct RateCounter {
    window: Duration,
    events: Mutex<VecDeque<Instant>>,
}

impl RateCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            events: Mutex::new(VecDeque::new()),
        }
    }

    pub fn incr(&self) {
        let now = Instant::now();
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        Self::evict(&mut events, now, self.window);
        events.push_back(now);
    }

    /// Events seen during the last window
    pub fn rate(&self) -> usize {
        let now = Instant::now();
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        Self::evict(&mut events, now, self.window);
        events.len()
    }

    fn evict(events: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = events.front() {
            if now.duration_since(*oldest) > window {
                events.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for RateCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

/// Live statistics of a crawl
#[derive(Debug, Default)]
pub struct CrawlStats {
    /// Items discovered but not yet picked up
    pub queued: Counter,
    /// Exchanges written to the archive
    pub crawled: Counter,
    pub crawled_seeds: Counter,
    pub crawled_pages: Counter,
    pub crawled_assets: Counter,
    pub active_workers: Counter,
    /// Successful captures per second
    pub uris_per_second: RateCounter,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }
}
