//! Search results page extraction.

use super::{resolve_url, squash_whitespace};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use shared::SearchResult;
use tracing::debug;
use url::Url;

static ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("div.item").expect("valid selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("a.name").expect("valid selector"));
static POSTER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.poster[href]").expect("valid selector"));
static POSTER_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.poster img[src]").expect("valid selector"));

/// Build the search page URL for `keyword`.
pub fn search_url(base: &Url, keyword: &str) -> Url {
    let mut url = base.clone();
    url.set_path("/search");
    url.set_fragment(None);
    url.query_pairs_mut().clear().append_pair("keyword", keyword);
    url
}

/// Extract one [`SearchResult`] per result item, in page order.
///
/// Each record is read from inside a single `div.item`, so an item with a
/// missing field is dropped on its own and never shifts its neighbours.
pub fn extract_search_results(html: &str, base: &Url) -> Vec<SearchResult> {
    let document = Html::parse_document(html);

    let mut results = Vec::new();
    for (index, item) in document.select(&ITEM).enumerate() {
        match extract_item(item, base) {
            Some(result) => results.push(result),
            None => debug!(index, "Skipping incomplete search item"),
        }
    }

    results
}

fn extract_item(item: ElementRef<'_>, base: &Url) -> Option<SearchResult> {
    let title = item
        .select(&TITLE)
        .next()
        .map(|a| squash_whitespace(&a.text().collect::<String>()))
        .filter(|t| !t.is_empty())?;

    let image = item
        .select(&POSTER_IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())?
        .to_string();

    let href = item
        .select(&POSTER)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_url(base, href))?;

    Some(SearchResult { title, image, href })
}
