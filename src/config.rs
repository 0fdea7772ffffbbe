use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::crawler::{CrawlerConfig, PAGE_REQUEST_TIMEOUT_SEC};

/// Log levels as defined in log2 crate
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// This struct receives all program arguments, while CrawlerConfig
/// describes only the crawler
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(author, version, about = "Concurrent breadth-first link discovery", long_about = None)]
pub struct Config {
    /// URL to navigate to and start scraping
    pub url: String,
    /// Maximum number of link hops to follow from the seed
    #[arg(long, default_value = "2")]
    pub max_depth: usize,
    /// Number of concurrent workers
    #[arg(long, default_value = "10")]
    pub max_threads: usize,
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = PAGE_REQUEST_TIMEOUT_SEC)]
    pub request_timeout: u64,
    /// Annotate discovered links with the worker that found them
    #[arg(short, long)]
    pub verbose: bool,
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_enum)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_depth == 0 {
            anyhow::bail!("max_depth must be greater than 0");
        }
        if self.max_threads == 0 {
            anyhow::bail!("max_threads must be greater than 0");
        }
        Ok(())
    }

    /// Verbose output never hides soft failures behind a quieter level
    pub fn effective_log_level(&self) -> LogLevel {
        match (self.verbose, self.log_level) {
            (true, LogLevel::Warn | LogLevel::Error) => LogLevel::Info,
            (_, level) => level,
        }
    }

    pub fn crawler_config(&self) -> CrawlerConfig {
        CrawlerConfig::new()
            .with_max_depth(self.max_depth)
            .with_thread_count(self.max_threads)
            .with_request_timeout(self.request_timeout)
            .with_verbose(self.verbose)
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}
