//! Episode page and player frame extraction.
//!
//! Reaching the media file takes two pages: the episode page embeds a player
//! frame, and the frame's inline script carries the direct `.mp4` URL.

use super::resolve_url;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

static PLAYER_FRAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("iframe#player-iframe[src]").expect("valid selector"));

// Player config in inline JS, e.g. `file: "https://host/path/video.mp4"`.
static STREAM_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)file:\s*['"](https://[^'"]+\.mp4)['"]"#).expect("valid regex")
});

/// Absolute URL of the embedded player frame, if the episode page has one.
pub fn extract_player_frame(html: &str, base: &Url) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(&PLAYER_FRAME)
        .next()
        .and_then(|iframe| iframe.value().attr("src"))
        .and_then(|src| resolve_url(base, src))
}

/// First direct `.mp4` URL declared in a player frame page.
pub fn extract_stream_url(html: &str) -> Option<String> {
    STREAM_FILE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
