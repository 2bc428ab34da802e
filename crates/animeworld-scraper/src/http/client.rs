//! HTTP page fetcher with a browser-like header profile.

use super::delay::RequestDelay;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use shared::ScraperConfig;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of page bodies for the scraper
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher
pub struct HttpFetcher {
    /// HTTP client carrying the default headers
    client: Client,
    /// Delay applied before every request
    delay: RequestDelay,
}

impl HttpFetcher {
    /// Create a fetcher from the `[scraper]` config section
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        Self::with_builder(config, Client::builder())
    }

    /// Create a fetcher on top of a caller-supplied client builder
    pub fn with_builder(config: &ScraperConfig, builder: ClientBuilder) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        insert_header(&mut headers, USER_AGENT, &config.user_agent)?;
        insert_header(&mut headers, ACCEPT, &config.accept)?;
        insert_header(&mut headers, ACCEPT_LANGUAGE, &config.accept_language)?;

        let client = builder
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            delay: RequestDelay::from(config.delay),
        })
    }
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<(), FetchError> {
    let value = HeaderValue::from_str(value).map_err(|source| FetchError::InvalidHeader {
        name: name.as_str().to_string(),
        source,
    })?;
    headers.insert(name, value);
    Ok(())
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.delay.wait().await;

        debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Request failed");
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        if body.trim().is_empty() {
            warn!(url = %url, "Empty response body");
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }

        debug!(url = %url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
