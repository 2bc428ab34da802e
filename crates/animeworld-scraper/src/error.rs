//! Error types for fetching and extraction.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to obtain a page body
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid value for header {name}: {source}")]
    InvalidHeader {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("empty response body from {url}")]
    EmptyBody { url: String },
}

/// Failure of a scraping operation
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("player frame not found on {url}")]
    FrameNotFound { url: String },

    #[error("stream URL not found in player frame {url}")]
    StreamNotFound { url: String },
}

impl ScrapeError {
    /// Whether the failure came from the transport rather than the page content.
    pub fn is_fetch(&self) -> bool {
        matches!(self, ScrapeError::Fetch(_))
    }

    /// Whether an expected element was absent from a fetched page.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ScrapeError::FrameNotFound { .. } | ScrapeError::StreamNotFound { .. }
        )
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScrapeError::FrameNotFound {
            url: "https://www.animeworld.so/play/x/1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "player frame not found on https://www.animeworld.so/play/x/1"
        );
        assert!(err.is_not_found());
        assert!(!err.is_fetch());

        let err: ScrapeError = FetchError::Status {
            url: "https://www.animeworld.so/x".to_string(),
            status: StatusCode::NOT_FOUND,
        }
        .into();
        assert_eq!(err.to_string(), "HTTP 404 Not Found for https://www.animeworld.so/x");
        assert!(err.is_fetch());
    }
}
