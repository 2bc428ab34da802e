//! Anime page metadata extraction.

use super::{element_text, squash_whitespace};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use shared::AnimeDetails;

static DESCRIPTION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[class^="desc"] div[class^="long"]"#).expect("valid selector")
});
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2.title[data-jtitle]").expect("valid selector"));
static TERM: Lazy<Selector> = Lazy::new(|| Selector::parse("dt").expect("valid selector"));

const RELEASE_DATE_LABEL: &str = "Data di Uscita";

/// Extract [`AnimeDetails`] from an anime page.
///
/// Fields are looked up independently; a field that is not on the page is
/// left as an empty string.
pub fn extract_details(html: &str) -> AnimeDetails {
    let document = Html::parse_document(html);

    let description = document
        .select(&DESCRIPTION)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let alternative_title = document
        .select(&TITLE)
        .next()
        .and_then(|h2| h2.value().attr("data-jtitle"))
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    let release_year = definition(&document, RELEASE_DATE_LABEL).unwrap_or_default();

    AnimeDetails {
        description,
        alternative_title,
        release_year,
    }
}

/// Text of the `<dd>` that directly follows the `<dt>` labelled `label`.
///
/// The label comparison ignores case, surrounding whitespace and a trailing
/// colon.
fn definition(document: &Html, label: &str) -> Option<String> {
    let term = document.select(&TERM).find(|dt| {
        let text = squash_whitespace(&dt.text().collect::<String>());
        text.trim_end_matches(':').trim().eq_ignore_ascii_case(label)
    })?;

    let value = term
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .next()
        .filter(|el| el.value().name() == "dd")?;

    Some(squash_whitespace(&value.text().collect::<String>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
    <html><body>
      <div class="widget info">
        <h2 class="title" data-jtitle=" Shingeki no Kyojin ">L'attacco dei Giganti</h2>
        <div class="info col-md-9">
          <div class="row">
            <dl class="meta col-sm-6">
              <dt>Categoria:</dt>
              <dd><a href="/tv-series">Anime</a></dd>
              <dt>Data di Uscita:</dt>
              <dd>
                07 Aprile 2013
              </dd>
              <dt>Stagione:</dt>
              <dd><a href="/filter?season=spring">Primavera 2013</a></dd>
            </dl>
          </div>
        </div>
        <div class="desc">
          <div class="long">
            Molti anni fa, l'umanità fu <b>quasi sterminata</b>
            dai Giganti.<br><br>Eren giura vendetta.
          </div>
        </div>
      </div>
    </body></html>
    "#;

    #[test]
    fn test_extracts_all_fields() {
        let details = extract_details(PAGE);

        assert_eq!(
            details,
            AnimeDetails {
                description: "Molti anni fa, l'umanità fu quasi sterminata dai Giganti.\n\nEren giura vendetta."
                    .to_string(),
                alternative_title: "Shingeki no Kyojin".to_string(),
                release_year: "07 Aprile 2013".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_release_year_is_empty() {
        let html = PAGE.replace("Data di Uscita:", "Durata:");
        let details = extract_details(&html);

        assert_eq!(details.release_year, "");
        assert_eq!(details.alternative_title, "Shingeki no Kyojin");
        assert!(!details.description.is_empty());
    }

    #[test]
    fn test_label_match_is_lenient() {
        let html = r#"<dl><dt> data di uscita </dt><dd>2020</dd></dl>"#;
        assert_eq!(extract_details(html).release_year, "2020");
    }

    #[test]
    fn test_label_without_value() {
        let html = r#"<dl><dt>Data di Uscita:</dt><dt>Stagione:</dt><dd>Estate</dd></dl>"#;
        assert_eq!(extract_details(html).release_year, "");
    }

    #[test]
    fn test_empty_page_yields_defaults() {
        let details = extract_details("<html><body><p>Pagina non trovata</p></body></html>");
        assert_eq!(details, AnimeDetails::default());
    }
}
