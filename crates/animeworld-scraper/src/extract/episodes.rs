//! Episode list extraction.

use super::resolve_url;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use shared::Episode;
use tracing::debug;
use url::Url;

static EPISODE_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li.episode").expect("valid selector"));
static EPISODE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[data-episode-num][href]").expect("valid selector"));

/// Extract the episode list of an anime page, in page order.
///
/// Links are resolved against `base`. Items whose episode number is not a
/// non-negative integer are skipped.
pub fn extract_episodes(html: &str, base: &Url) -> Vec<Episode> {
    let document = Html::parse_document(html);

    document
        .select(&EPISODE_ITEM)
        .filter_map(|item| {
            let episode = extract_episode(item, base);
            if episode.is_none() {
                debug!(html = %item.html(), "Skipping malformed episode item");
            }
            episode
        })
        .collect()
}

fn extract_episode(item: ElementRef<'_>, base: &Url) -> Option<Episode> {
    let link = item.select(&EPISODE_LINK).next()?;
    let number = link
        .value()
        .attr("data-episode-num")?
        .trim()
        .parse::<u32>()
        .ok()?;
    let href = resolve_url(base, link.value().attr("href")?)?;

    Some(Episode { number, href })
}
