//! HTML field extraction.
//!
//! Pure functions turning page HTML into the records in [`shared::models`].
//! Every extractor works on a parsed DOM with CSS selectors, scoped so that
//! one record is built from one page element. The only exception is the
//! stream URL, which lives in inline JavaScript and is matched with a regex.

pub mod details;
pub mod episodes;
pub mod player;
pub mod search;

pub use details::extract_details;
pub use episodes::extract_episodes;
pub use player::{extract_player_frame, extract_stream_url};
pub use search::{extract_search_results, search_url};

use scraper::{ElementRef, Node};
use url::Url;

/// Resolve a link found in a page against the site base URL.
///
/// Returns `None` for empty or unparseable links.
pub(crate) fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(Into::into)
}

/// Collapse all whitespace runs in `s` into single spaces and trim.
pub(crate) fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text content of an element with markup stripped.
///
/// Whitespace inside text runs is collapsed, `<br>` becomes a line break,
/// and consecutive blank lines are reduced to one.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => {
                raw.extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }))
            }
            Node::Element(el) if el.name() == "br" => raw.push('\n'),
            _ => {}
        }
    }

    let mut lines: Vec<String> = Vec::new();
    for line in raw.split('\n') {
        let line = squash_whitespace(line);
        if line.is_empty() && lines.last().map_or(true, |prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn base() -> Url {
        Url::parse("https://www.animeworld.so").unwrap()
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url(&base(), "/play/naruto.abc"),
            Some("https://www.animeworld.so/play/naruto.abc".to_string())
        );
        assert_eq!(
            resolve_url(&base(), "  https://cdn.example/p.jpg "),
            Some("https://cdn.example/p.jpg".to_string())
        );
        assert_eq!(resolve_url(&base(), "   "), None);
    }

    #[test]
    fn test_element_text_strips_markup() {
        let html = Html::parse_fragment(
            "<div>  Primo <b>rigo</b>\n   continua<br><br><br>Secondo<br>  <i>rigo</i> <br></div>",
        );
        let div = html
            .select(&Selector::parse("div").unwrap())
            .next()
            .unwrap();

        assert_eq!(element_text(div), "Primo rigo continua\n\nSecondo\nrigo");
    }
}
