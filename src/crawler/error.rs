use reqwest::StatusCode;
use thiserror::Error;

/// A candidate link that can't be queued.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidUrlError {
    /// The anchor carried no `href` value at all
    #[error("anchor has no href value, invalid type.")]
    InvalidType,

    #[error("{0} is of invalid format.")]
    InvalidFormat(String),
}

/// Soft failure while retrieving a page. Never aborts the crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status} status code.")]
    HttpStatus { url: String, status: StatusCode },

    #[error("{url} is not an HTML page (content type {content_type}).")]
    NotHtml { url: String, content_type: String },

    #[error("failed to parse <a> selector: {0}")]
    Selector(String),
}

/// Misconfiguration detected before any crawling begins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be greater than 0")]
    ZeroWorkers,

    #[error("max depth must be greater than 0")]
    ZeroDepth,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("task_done() called more times than items were pushed")]
    TaskDoneUnderflow,

    #[error("work queue is closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("worker task failed: {0}")]
    WorkerPanicked(#[from] tokio::task::JoinError),
}
