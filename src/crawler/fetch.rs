use async_trait::async_trait;

use super::error::FetchError;

/// Retrieves a page and hands back the raw `href` of every anchor on it.
///
/// `None` entries stand for anchors without an `href`. Values are returned
/// verbatim: no resolution against the page URL and no filtering. Workers
/// validate and deduplicate them.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<Option<String>>, FetchError>;
}
