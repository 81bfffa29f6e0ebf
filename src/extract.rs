//! Article extraction from the opinion-section listing page.
//!
//! The listing is a grid of `article` elements, each expected to contain a
//! heading link, a body snippet, and a lead image. Fields degrade
//! independently:
//!
//! - no heading link: the element is unusable and is skipped, extraction
//!   of the remaining elements continues
//! - no paragraph: the record gets [`CONTENT_UNAVAILABLE`]
//! - no image, or an image source that won't resolve: `image_ref` stays
//!   unset
//!
//! A page with zero qualifying elements yields an empty vector, which
//! callers treat as a legitimate empty batch.

use crate::models::{ArticleRecord, CONTENT_UNAVAILABLE};
use crate::page::ListingPage;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static ARTICLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h2 a").unwrap());
static SNIPPET_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());

/// Extract up to `limit` article records from the listing page.
///
/// Only the first `limit` article elements are considered, so the result
/// never exceeds `limit` regardless of how many the page holds; skipped
/// elements are not backfilled from beyond the window. Relative image
/// sources are resolved against `base_url`.
#[instrument(level = "info", skip_all, fields(limit))]
pub fn extract_articles(page: &ListingPage, base_url: &Url, limit: usize) -> Vec<ArticleRecord> {
    let mut records = Vec::new();

    for (index, element) in page.document().select(&ARTICLE_SELECTOR).take(limit).enumerate() {
        let Some(title) = extract_title(element) else {
            warn!(index, "Article element has no heading link; skipping");
            continue;
        };

        let content = extract_snippet(element);
        let image_ref = extract_image_ref(element, base_url);
        debug!(index, %title, has_image = image_ref.is_some(), "Extracted article");

        records.push(ArticleRecord::new(title, content, image_ref));
    }

    info!(count = records.len(), "Extracted article records");
    records
}

fn extract_title(element: ElementRef<'_>) -> Option<String> {
    element
        .select(&TITLE_SELECTOR)
        .next()
        .map(|link| link.text().collect::<Vec<_>>().join(" ").trim().to_string())
}

fn extract_snippet(element: ElementRef<'_>) -> String {
    element
        .select(&SNIPPET_SELECTOR)
        .next()
        .map(|p| p.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .unwrap_or_else(|| CONTENT_UNAVAILABLE.to_string())
}

fn extract_image_ref(element: ElementRef<'_>, base_url: &Url) -> Option<String> {
    let src = element.select(&IMAGE_SELECTOR).next()?.value().attr("src")?;
    match base_url.join(src) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            warn!(%src, error = %e, "Image source did not resolve");
            None
        }
    }
}
