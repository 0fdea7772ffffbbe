use std::sync::Arc;

use super::error::ConfigError;

/// Default timeout for page requests in seconds
pub const PAGE_REQUEST_TIMEOUT_SEC: u64 = 10;

/// Configuration for one crawl session
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub max_depth: usize,
    pub thread_count: usize,
    pub request_timeout_sec: u64,
    /// Surface soft failures at `info` instead of `debug`
    pub verbose: bool,
}

impl CrawlerConfig {
    pub fn new() -> Self {
        Self {
            max_depth: 2,
            thread_count: 10,
            request_timeout_sec: PAGE_REQUEST_TIMEOUT_SEC,
            verbose: false,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_thread_count(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub fn with_request_timeout(mut self, timeout_sec: u64) -> Self {
        self.request_timeout_sec = timeout_sec;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thread_count == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub type CrawlerConfigRef = Arc<CrawlerConfig>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let config = CrawlerConfig::new()
            .with_thread_count(4)
            .with_max_depth(3)
            .with_verbose(true);

        assert_eq!(config.thread_count, 4);
        assert_eq!(config.max_depth, 3);
        assert!(config.verbose);
        assert_eq!(config.request_timeout_sec, PAGE_REQUEST_TIMEOUT_SEC);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let no_workers = CrawlerConfig::new().with_thread_count(0);
        assert_eq!(no_workers.validate(), Err(ConfigError::ZeroWorkers));

        let no_depth = CrawlerConfig::new().with_max_depth(0);
        assert_eq!(no_depth.validate(), Err(ConfigError::ZeroDepth));
    }
}
