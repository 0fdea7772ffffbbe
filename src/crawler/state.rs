use serde::Serialize;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::queue::{WorkItem, WorkQueue};
use super::visited::VisitedSet;

/// A link first seen while processing a page at `depth`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub url: String,
    pub depth: usize,
    pub worker_id: usize,
}

/// Counters updated by workers. Relaxed ordering: only totals matter.
#[derive(Debug, Default)]
pub struct CrawlStats {
    pub pages_fetched: AtomicUsize,
    pub fetch_failures: AtomicUsize,
    pub invalid_links: AtomicUsize,
    pub duplicate_links: AtomicUsize,
    pub links_discovered: AtomicUsize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStatsSnapshot {
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub invalid_links: usize,
    pub duplicate_links: usize,
    pub links_discovered: usize,
}

impl CrawlStats {
    pub fn snapshot(&self) -> CrawlStatsSnapshot {
        CrawlStatsSnapshot {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            invalid_links: self.invalid_links.load(Ordering::Relaxed),
            duplicate_links: self.duplicate_links.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
        }
    }
}

/// State of one crawl session, shared between the coordinator and its workers
pub struct CrawlerState {
    /// Pending work for the current depth level
    pub queue: WorkQueue<WorkItem>,
    /// Every URL ever queued, seed included
    pub visited: VisitedSet,
    /// Links discovered during the current depth level
    level_results: Mutex<Vec<Discovery>>,
    pub stats: CrawlStats,
}

impl CrawlerState {
    pub fn new() -> Self {
        Self {
            queue: WorkQueue::new(),
            visited: VisitedSet::new(),
            level_results: Mutex::new(Vec::new()),
            stats: CrawlStats::default(),
        }
    }

    pub fn record_discovery(&self, discovery: Discovery) {
        self.level_results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(discovery);
        self.stats.links_discovered.fetch_add(1, Ordering::Relaxed);
    }

    /// Hands over this level's discoveries and leaves the collection empty
    pub fn take_level_results(&self) -> Vec<Discovery> {
        let mut results = self
            .level_results
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        mem::take(&mut *results)
    }
}

impl Default for CrawlerState {
    fn default() -> Self {
        Self::new()
    }
}

pub type CrawlerStateRef = Arc<CrawlerState>;
