use anyhow::Result;
use log2::*;
use std::sync::Arc;
use std::time::Instant;

use link_crawler::config;
use link_crawler::crawler::{self, Crawler, HttpFetcher, PageFetcher};
use link_crawler::report;

/// Indicates start time of the crawl, lazily initialized
pub static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = *START_TIME;
    let cfg = config::Config::new();
    cfg.validate()?;
    let _log2 = stdout()
        .module(true)
        .module_with_line(true)
        .module_filter(|module| module.starts_with("link_crawler"))
        .compress(false)
        .level(cfg.effective_log_level().to_string())
        .start();

    // an unusable seed is a soft failure: the crawl runs one empty level
    if let Err(e) = crawler::validate_url(&cfg.url) {
        warn!("Seed {}", e);
    }

    let crawler_config = Arc::new(cfg.crawler_config());
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&crawler_config));
    let coordinator = Crawler::new(crawler_config, fetcher)?;

    match coordinator.crawl(&cfg.url).await {
        Ok(crawl_report) => {
            report::print_report(&crawl_report, cfg.verbose);
            info!("Crawling completed in {:?}", START_TIME.elapsed());
        }
        Err(e) => {
            error!("Crawling failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
