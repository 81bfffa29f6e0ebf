//! The rendered opinion-section listing page.
//!
//! [`ListingPage`] is a read-only handle over a parsed document. The
//! extractor queries it for article elements; it never navigates or
//! mutates anything.
//!
//! [`wait_for_listing`] is the runner-side fetch loop: the section index
//! is rendered server-side but occasionally comes back before the article
//! grid is present, so the page is re-fetched until it contains at least
//! one article element or the wait bound expires. Expiry hands back
//! whatever the page last looked like, possibly empty, and the rest of
//! the pipeline treats an empty listing as "no articles found", not a
//! fault.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{info, instrument, warn};

static ARTICLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());

/// How long to pause between listing re-fetches.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// A parsed listing document, queried read-only by the extractor.
pub struct ListingPage {
    document: Html,
}

impl ListingPage {
    /// Parse a listing page out of raw HTML.
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Number of article elements currently present.
    pub fn article_count(&self) -> usize {
        self.document.select(&ARTICLE_SELECTOR).count()
    }

    pub(crate) fn document(&self) -> &Html {
        &self.document
    }
}

/// Fetch the listing page, re-fetching until it contains article elements
/// or `wait` expires.
///
/// Fetch and read errors inside the window are logged and retried; they
/// only surface as an empty page if the bound runs out first. The
/// returned page may therefore contain zero articles, which downstream
/// code treats as a legitimate empty batch.
#[instrument(level = "info", skip(client), fields(%url, wait_secs = wait.as_secs()))]
pub async fn wait_for_listing(client: &reqwest::Client, url: &str, wait: Duration) -> ListingPage {
    let deadline = Instant::now() + wait;
    let mut last_html = String::new();

    loop {
        match fetch_listing_html(client, url).await {
            Ok(html) => {
                let count = ListingPage::from_html(&html).article_count();
                if count > 0 {
                    info!(count, "Listing page populated");
                    return ListingPage::from_html(&html);
                }
                last_html = html;
            }
            Err(e) => warn!(error = %e, "Listing fetch failed"),
        }

        if Instant::now() + POLL_INTERVAL > deadline {
            warn!("Listing page never populated within the wait bound; proceeding with what we have");
            return ListingPage::from_html(&last_html);
        }
        sleep(POLL_INTERVAL).await;
    }
}

async fn fetch_listing_html(client: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    response.text().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LISTING: &str = r#"
        <html><body>
          <article><h2><a href="/a">Uno</a></h2></article>
          <article><h2><a href="/b">Dos</a></h2></article>
        </body></html>
    "#;

    #[test]
    fn test_article_count() {
        assert_eq!(ListingPage::from_html(LISTING).article_count(), 2);
        assert_eq!(ListingPage::from_html("<html></html>").article_count(), 0);
        assert_eq!(ListingPage::from_html("").article_count(), 0);
    }

    #[tokio::test]
    async fn test_wait_returns_populated_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/opinion/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/opinion/", server.uri());
        let page = wait_for_listing(&client, &url, Duration::from_secs(5)).await;
        assert_eq!(page.article_count(), 2);
    }

    #[tokio::test]
    async fn test_wait_expiry_yields_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/opinion/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/opinion/", server.uri());
        // Bound shorter than one poll interval: a single fetch, then give up.
        let page = wait_for_listing(&client, &url, Duration::from_millis(50)).await;
        assert_eq!(page.article_count(), 0);
    }

    #[tokio::test]
    async fn test_wait_survives_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/opinion/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/opinion/", server.uri());
        let page = wait_for_listing(&client, &url, Duration::from_millis(50)).await;
        assert_eq!(page.article_count(), 0);
    }
}
