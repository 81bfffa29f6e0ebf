//! Title translation with retry support.
//!
//! The translation service is an external HTTP endpoint speaking the
//! LibreTranslate wire format: POST `{q, source, target, format}` in,
//! `{translatedText}` out. It is treated as unreliable and rate-limited,
//! so the module is built around a trait seam:
//!
//! - [`Translate`]: core trait, one text unit in, one out
//! - [`HttpTranslator`]: the real client
//! - [`RetryTranslate`]: decorator adding capped exponential backoff with
//!   jitter to any [`Translate`] implementation
//!
//! Errors are returned to the caller as [`TranslateError`]; mapping a
//! failed call to the fallback marker happens once, in the enrichment
//! pipeline, never here.

use crate::utils::truncate_for_log;
use rand::{Rng, rng};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// A failure while translating one piece of text.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// The request never completed (connect failure, timeout, ...).
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("translation endpoint returned {0}")]
    RemoteStatus(StatusCode),
    /// The endpoint answered 2xx but the body was not the expected shape.
    #[error("malformed translation response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Trait for translating a single piece of text between two languages.
///
/// Implementors take one text unit and produce one translated unit; no
/// batching is assumed from the underlying service. The abstraction
/// allows decorators (like retry logic) and test stubs.
pub trait Translate {
    /// Translate `text` from `source_lang` into `dest_lang`.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        dest_lang: &str,
    ) -> Result<String, TranslateError>;
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// HTTP client for a LibreTranslate-style translation endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranslator {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl Translate for HttpTranslator {
    #[instrument(level = "debug", skip_all, fields(endpoint = %self.endpoint))]
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        dest_lang: &str,
    ) -> Result<String, TranslateError> {
        let request = TranslateRequest {
            q: text,
            source: source_lang,
            target: dest_lang,
            format: "text",
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::RemoteStatus(status));
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<TranslateResponse>(&body).map_err(|e| {
            warn!(
                error = %e,
                response_preview = %truncate_for_log(&body, 300),
                "Translation endpoint returned non-conforming JSON"
            );
            e
        })?;

        debug!("Translated one title");
        Ok(parsed.translated_text)
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`Translate`]
/// implementation.
///
/// The delay between retries follows:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryTranslate<T> {
    inner: T,
    max_retries: usize,
    base_delay: Duration,
    max_delay: Duration,
}

impl<T> RetryTranslate<T>
where
    T: Translate,
{
    pub fn new(inner: T, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl<T> fmt::Debug for RetryTranslate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryTranslate")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> Translate for RetryTranslate<T>
where
    T: Translate,
{
    #[instrument(level = "debug", skip_all)]
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        dest_lang: &str,
    ) -> Result<String, TranslateError> {
        let mut attempt = 0usize;

        loop {
            match self.inner.translate(text, source_lang, dest_lang).await {
                Ok(translated) => return Ok(translated),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        warn!(attempt, max = self.max_retries, error = %e, "translate() exhausted retries");
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + Duration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        ?delay,
                        error = %e,
                        "translate() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}
