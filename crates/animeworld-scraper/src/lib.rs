//! AnimeWorld scraper library.
//!
//! This library fetches AnimeWorld pages and extracts search results, anime
//! metadata, episode lists, and direct stream URLs from them.

pub mod error;
pub mod extract;
pub mod http;
pub mod pipeline;

pub use error::{FetchError, ScrapeError};
pub use http::{HttpFetcher, PageFetcher, RequestDelay};
pub use pipeline::AnimeWorldScraper;
