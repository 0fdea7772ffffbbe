pub mod config;
pub mod error;
pub mod fetch;
pub mod queue;
pub mod runner;
pub mod scrape;
pub mod state;
pub mod validate;
pub mod visited;
pub mod worker;


pub use config::{CrawlerConfig, CrawlerConfigRef, PAGE_REQUEST_TIMEOUT_SEC};
pub use error::{ConfigError, CrawlError, FetchError, InvalidUrlError, QueueError};
pub use fetch::PageFetcher;
pub use queue::{WorkItem, WorkQueue};
pub use runner::{CrawlReport, Crawler, LevelReport};
pub use scrape::{HttpFetcher, extract_links};
pub use state::{CrawlStatsSnapshot, CrawlerState, CrawlerStateRef, Discovery};
pub use validate::{validate_href, validate_url};
pub use visited::VisitedSet;
pub use worker::WorkerPool;
