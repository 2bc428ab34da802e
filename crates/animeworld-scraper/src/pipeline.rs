//! Scraping pipeline.
//!
//! Composes a [`PageFetcher`] with the extractors: each operation fetches a
//! page, extracts from it, and returns typed records. Errors are always
//! returned to the caller; nothing is defaulted here.

use crate::error::{FetchError, Result, ScrapeError};
use crate::extract;
use crate::http::{HttpFetcher, PageFetcher};
use shared::{AnimeDetails, Episode, ScraperConfig, SearchResult, StreamUrl};
use tracing::{debug, info, warn};
use url::Url;

/// AnimeWorld scraper
pub struct AnimeWorldScraper<F = HttpFetcher> {
    /// Page source
    fetcher: F,
    /// Site base URL for search and link resolution
    base_url: Url,
}

impl AnimeWorldScraper<HttpFetcher> {
    /// Create a scraper backed by HTTP from the `[scraper]` config section
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config).map_err(ScrapeError::Fetch)?;
        Self::new(fetcher, &config.base_url)
    }
}

impl<F: PageFetcher> AnimeWorldScraper<F> {
    /// Create a scraper over any page source
    pub fn new(fetcher: F, base_url: &str) -> Result<Self> {
        let base_url = parse_url(base_url)?;
        Ok(Self { fetcher, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Search the catalogue by keyword
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>> {
        let url = extract::search_url(&self.base_url, keyword);
        info!(keyword = %keyword, url = %url, "Searching");

        let html = self.fetch(url.as_str()).await?;
        let results = extract::extract_search_results(&html, &self.base_url);

        info!(keyword = %keyword, results = results.len(), "Search complete");
        Ok(results)
    }

    /// Metadata of an anime page
    pub async fn details(&self, url: &str) -> Result<AnimeDetails> {
        let url = self.page_url(url)?;
        info!(url = %url, "Fetching anime details");

        let html = self.fetch(url.as_str()).await?;
        let details = extract::extract_details(&html);

        if details.description.is_empty() {
            debug!(url = %url, "No description on page");
        }
        if details.release_year.is_empty() {
            debug!(url = %url, "No release date on page");
        }

        Ok(details)
    }

    /// Episode list of an anime page
    pub async fn episodes(&self, url: &str) -> Result<Vec<Episode>> {
        let url = self.page_url(url)?;
        info!(url = %url, "Fetching episode list");

        let html = self.fetch(url.as_str()).await?;
        let episodes = extract::extract_episodes(&html, &self.base_url);

        info!(url = %url, episodes = episodes.len(), "Episode list complete");
        Ok(episodes)
    }

    /// Direct media URL of an episode
    ///
    /// Fetches the episode page, follows its player frame, and reads the
    /// media URL from the frame. A missing frame fails before the second
    /// request is made.
    pub async fn stream_url(&self, url: &str) -> Result<StreamUrl> {
        let url = self.page_url(url)?;
        info!(url = %url, "Resolving stream URL");

        let html = self.fetch(url.as_str()).await?;
        let frame_url = extract::extract_player_frame(&html, &self.base_url).ok_or_else(|| {
            warn!(url = %url, "Player frame not found");
            ScrapeError::FrameNotFound {
                url: url.to_string(),
            }
        })?;
        debug!(frame = %frame_url, "Found player frame");

        let frame_html = self.fetch(&frame_url).await?;
        let stream = extract::extract_stream_url(&frame_html).ok_or_else(|| {
            warn!(frame = %frame_url, "Stream URL not found");
            ScrapeError::StreamNotFound {
                url: frame_url.clone(),
            }
        })?;

        info!(url = %url, stream = %stream, "Resolved stream URL");
        Ok(StreamUrl::new(stream))
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetcher.fetch(url).await
    }

    /// Accept absolute URLs as well as paths relative to the site.
    fn page_url(&self, url: &str) -> Result<Url> {
        self.base_url
            .join(url.trim())
            .map_err(|source| ScrapeError::InvalidUrl {
                url: url.to_string(),
                source,
            })
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url.trim()).map_err(|source| ScrapeError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
