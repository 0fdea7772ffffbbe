use futures::FutureExt;
use log2::{debug, error, info, warn};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::task::JoinHandle;

use super::config::CrawlerConfigRef;
use super::error::CrawlError;
use super::fetch::PageFetcher;
use super::queue::{WorkItem, WorkQueue};
use super::state::{CrawlerStateRef, Discovery};
use super::validate::validate_href;

/// Fixed set of workers pulling from the shared queue.
/// Started once per crawl; they stay parked on `pop` between levels.
pub struct WorkerPool {
    state: CrawlerStateRef,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn spawn(
        state: CrawlerStateRef,
        config: CrawlerConfigRef,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        let handles = (0..config.thread_count)
            .map(|worker_id| {
                let state = Arc::clone(&state);
                let config = Arc::clone(&config);
                let fetcher = Arc::clone(&fetcher);
                tokio::spawn(run_worker(worker_id, state, config, fetcher))
            })
            .collect();

        Self { state, handles }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Closes the queue and waits for every worker to return.
    pub async fn shutdown(self) -> Result<(), CrawlError> {
        self.state.queue.close();
        for handle in self.handles {
            handle.await?;
        }
        Ok(())
    }
}

/// Calls `task_done` however processing of an item ends, unwinding included.
struct TaskDoneGuard<'a>(&'a WorkQueue<WorkItem>);

impl Drop for TaskDoneGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.0.task_done() {
            error!("Work queue bookkeeping broke: {}", e);
        }
    }
}

async fn run_worker(
    worker_id: usize,
    state: CrawlerStateRef,
    config: CrawlerConfigRef,
    fetcher: Arc<dyn PageFetcher>,
) {
    debug!("Worker {} started", worker_id);

    while let Some(item) = state.queue.pop().await {
        let _done = TaskDoneGuard(&state.queue);
        let processed =
            AssertUnwindSafe(process_item(worker_id, &item, &state, &config, fetcher.as_ref()))
                .catch_unwind()
                .await;
        // a panicking fetch is one more soft failure; the worker stays in the pool
        if processed.is_err() {
            state.stats.fetch_failures.fetch_add(1, Ordering::Relaxed);
            warn!("Worker {}: processing {} panicked ... skipping.", worker_id, item.url);
        }
    }

    debug!("Worker {} finished", worker_id);
}

async fn process_item(
    worker_id: usize,
    item: &WorkItem,
    state: &CrawlerStateRef,
    config: &CrawlerConfigRef,
    fetcher: &dyn PageFetcher,
) {
    debug!("Worker {}: Crawling {} at depth {}", worker_id, item.url, item.depth);

    let candidates = match fetcher.fetch(&item.url).await {
        Ok(candidates) => candidates,
        Err(e) => {
            state.stats.fetch_failures.fetch_add(1, Ordering::Relaxed);
            if config.verbose {
                info!("Worker {}: failed to fetch {}: {}", worker_id, item.url, e);
            } else {
                debug!("Worker {}: failed to fetch {}: {}", worker_id, item.url, e);
            }
            return;
        }
    };
    state.stats.pages_fetched.fetch_add(1, Ordering::Relaxed);

    for candidate in &candidates {
        let url = match validate_href(candidate.as_deref()) {
            Ok(url) => url,
            Err(e) => {
                state.stats.invalid_links.fetch_add(1, Ordering::Relaxed);
                if config.verbose {
                    info!("Worker {}: {} ... skipping.", worker_id, e);
                } else {
                    debug!("Worker {}: {} ... skipping.", worker_id, e);
                }
                continue;
            }
        };

        if !state.visited.try_mark_visited(url) {
            state.stats.duplicate_links.fetch_add(1, Ordering::Relaxed);
            continue;
        }

        state.record_discovery(Discovery {
            url: url.to_string(),
            depth: item.depth,
            worker_id,
        });
    }
}
