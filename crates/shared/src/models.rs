//! Data models for the project.
//!
//! Plain records produced by the scraper. Nothing here outlives a single
//! request/response cycle; serialization follows the JSON shape the site
//! scrapers have always emitted (camelCase field names).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    /// Poster image URL, as found in the page
    pub image: String,
    /// Absolute URL of the anime page
    pub href: String,
}

/// Metadata from an anime page
///
/// Every field defaults to an empty string when the page does not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetails {
    /// Plain-text synopsis (markup stripped)
    pub description: String,
    pub alternative_title: String,
    pub release_year: String,
}

/// Episode link from an anime page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub number: u32,
    /// Absolute URL of the episode page
    pub href: String,
}

/// Direct media URL found inside a player frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamUrl(String);

impl StreamUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
