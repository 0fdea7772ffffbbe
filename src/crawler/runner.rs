use log2::{debug, info};
use serde::Serialize;
use std::sync::Arc;

use super::config::CrawlerConfigRef;
use super::error::CrawlError;
use super::fetch::PageFetcher;
use super::queue::WorkItem;
use super::state::{CrawlStatsSnapshot, CrawlerState, CrawlerStateRef, Discovery};
use super::worker::WorkerPool;

/// Coordinator phases, one cycle per depth level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrawlPhase {
    Seeding(usize),
    Draining(usize),
    Advancing(usize),
    Terminated,
}

/// What a single depth level fetched and found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelReport {
    pub depth: usize,
    /// URLs fetched at this depth
    pub frontier: Vec<String>,
    /// Links first seen while processing `frontier`, sorted by URL
    pub discovered: Vec<Discovery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    pub levels: Vec<LevelReport>,
    pub stats: CrawlStatsSnapshot,
}

impl CrawlReport {
    /// Every discovered URL across all levels, in level order
    pub fn discovered_urls(&self) -> impl Iterator<Item = &str> {
        self.levels
            .iter()
            .flat_map(|level| level.discovered.iter().map(|d| d.url.as_str()))
    }
}

/// Depth-by-depth crawl driver. Owns the worker pool for each session.
pub struct Crawler {
    config: CrawlerConfigRef,
    fetcher: Arc<dyn PageFetcher>,
}

impl Crawler {
    /// Fails on misconfiguration before anything is spawned.
    pub fn new(config: CrawlerConfigRef, fetcher: Arc<dyn PageFetcher>) -> Result<Self, CrawlError> {
        config.validate()?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &CrawlerConfigRef {
        &self.config
    }

    pub async fn crawl(&self, seed: &str) -> Result<CrawlReport, CrawlError> {
        let state: CrawlerStateRef = Arc::new(CrawlerState::new());
        let pool = WorkerPool::spawn(
            Arc::clone(&state),
            Arc::clone(&self.config),
            Arc::clone(&self.fetcher),
        );
        info!("Started {} workers, max depth {}", pool.size(), self.config.max_depth);

        let result = self.drive(seed, &state).await;
        pool.shutdown().await?;

        let levels = result?;
        Ok(CrawlReport {
            seed: seed.to_string(),
            levels,
            stats: state.stats.snapshot(),
        })
    }

    async fn drive(&self, seed: &str, state: &CrawlerState) -> Result<Vec<LevelReport>, CrawlError> {
        // the seed counts as visited so a self-link is never queued again
        state.visited.try_mark_visited(seed);

        let mut frontier = vec![seed.to_string()];
        let mut levels = Vec::new();
        let mut phase = CrawlPhase::Seeding(0);

        loop {
            debug!("Crawl phase {:?}", phase);
            phase = match phase {
                CrawlPhase::Seeding(depth) => {
                    for url in &frontier {
                        state.queue.push(WorkItem::new(url.as_str(), depth))?;
                    }
                    CrawlPhase::Draining(depth)
                }
                CrawlPhase::Draining(depth) => {
                    state.queue.join().await;
                    CrawlPhase::Advancing(depth)
                }
                CrawlPhase::Advancing(depth) => {
                    let mut discovered = state.take_level_results();
                    discovered.sort_by(|a, b| a.url.cmp(&b.url));
                    let next: Vec<String> = discovered.iter().map(|d| d.url.clone()).collect();

                    info!(
                        "Depth {}: fetched {} page(s), discovered {} new link(s)",
                        depth,
                        frontier.len(),
                        discovered.len()
                    );
                    levels.push(LevelReport {
                        depth,
                        frontier: std::mem::replace(&mut frontier, next),
                        discovered,
                    });

                    if frontier.is_empty() || depth + 1 >= self.config.max_depth {
                        CrawlPhase::Terminated
                    } else {
                        CrawlPhase::Seeding(depth + 1)
                    }
                }
                CrawlPhase::Terminated => {
                    state.queue.join().await;
                    break;
                }
            };
        }

        Ok(levels)
    }
}
