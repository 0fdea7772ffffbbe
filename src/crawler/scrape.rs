use async_trait::async_trait;
use log2::{debug, info};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Selector};
use std::time::Duration;

use super::config::CrawlerConfig;
use super::error::FetchError;
use super::fetch::PageFetcher;

/// Page fetcher backed by reqwest, extracting anchors with scraper.
pub struct HttpFetcher {
    client: Client,
    request_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            request_timeout: Duration::from_secs(config.request_timeout_sec),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<Option<String>>, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        // a missing content type is given the benefit of the doubt
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !is_html(content_type) {
                return Err(FetchError::NotHtml {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        let body = response.text().await.map_err(request_error)?;
        let links = extract_links(&body)?;

        info!("Found {} anchors on page {}", links.len(), url);
        Ok(links)
    }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

/// Collects the raw `href` of every `<a>` element in document order.
pub fn extract_links(html: &str) -> Result<Vec<Option<String>>, FetchError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("a").map_err(|e| FetchError::Selector(e.to_string()))?;

    let links: Vec<Option<String>> = document
        .select(&selector)
        .map(|element| element.value().attr("href").map(str::to_string))
        .collect();

    debug!("Extracted {} anchors", links.len());
    Ok(links)
}
