use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use sn_core::{ArticleSource, Error, PageFetcher, Result};
use tracing::debug;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; sn-study-notes/0.1)";

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Single-shot GET over HTTP(S). No retries and no caching.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .default_headers(headers)
            .redirect(Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| Error::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    fn transport_error(&self, source: &ArticleSource, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Fetch(format!(
                "Request to {} timed out after {}s",
                source,
                self.timeout.as_secs_f32()
            ))
        } else {
            Error::Fetch(format!("Failed to fetch {}: {}", source, err))
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, source: &ArticleSource) -> Result<String> {
        let response = self
            .client
            .get(source.url().clone())
            .send()
            .await
            .map_err(|e| self.transport_error(source, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP {} for {}", status, source)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| self.transport_error(source, e))?;
        debug!(url = %source, bytes = html.len(), "fetched page");
        Ok(html)
    }
}
