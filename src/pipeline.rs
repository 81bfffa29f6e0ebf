//! The enrichment pipeline: translation and image download per record.
//!
//! Records fan out concurrently; within one record, the title translation
//! and the image fetch run independently of each other. Completion order
//! is whatever the network gives us, so results carry their input index
//! and are reassembled into the original listing order before being
//! returned.
//!
//! Every fault is absorbed here at field scope:
//! - a failed (or impossible) translation becomes [`TRANSLATION_FAILED`]
//! - a failed image fetch leaves `local_image_path` unset
//!
//! No record is ever dropped: the output sequence always has the same
//! length and order as the input.

use crate::assets::fetch_and_store;
use crate::models::{ArticleRecord, TRANSLATION_FAILED};
use crate::translate::Translate;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// How many records are enriched at a time.
const ENRICH_WINDOW: usize = 4;

/// The enrichment pipeline and its configuration.
///
/// Output directory, language pair, and translator handle are fixed at
/// construction and threaded through every call; there is no process-wide
/// state.
pub struct Pipeline<T> {
    translator: T,
    client: reqwest::Client,
    output_dir: PathBuf,
    source_lang: String,
    dest_lang: String,
}

impl<T> Pipeline<T>
where
    T: Translate,
{
    pub fn new(
        translator: T,
        client: reqwest::Client,
        output_dir: impl Into<PathBuf>,
        source_lang: impl Into<String>,
        dest_lang: impl Into<String>,
    ) -> Self {
        Self {
            translator,
            client,
            output_dir: output_dir.into(),
            source_lang: source_lang.into(),
            dest_lang: dest_lang.into(),
        }
    }

    /// Enrich every record with a translated title and, where an image
    /// reference exists, a stored local image.
    ///
    /// Output order equals input order regardless of per-record
    /// completion order, and the output length always equals the input
    /// length.
    #[instrument(level = "info", skip_all, fields(count = records.len()))]
    pub async fn enrich(&self, records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
        let total = records.len();

        let completed: Vec<(usize, ArticleRecord)> = stream::iter(records.into_iter().enumerate())
            .map(|(index, record)| async move { (index, self.enrich_one(index, record).await) })
            .buffer_unordered(ENRICH_WINDOW)
            .collect()
            .await;

        // Reassemble into listing order; completion order is arbitrary.
        let mut slots: Vec<Option<ArticleRecord>> = (0..total).map(|_| None).collect();
        for (index, record) in completed {
            slots[index] = Some(record);
        }
        let enriched: Vec<ArticleRecord> = slots.into_iter().flatten().collect();

        info!(count = enriched.len(), "Enrichment complete");
        enriched
    }

    async fn enrich_one(&self, index: usize, mut record: ArticleRecord) -> ArticleRecord {
        let (translated_title, local_image_path) = tokio::join!(
            self.translate_title(index, &record.title),
            self.store_image(index, record.image_ref.as_deref()),
        );

        record.translated_title = Some(translated_title);
        record.local_image_path = local_image_path;
        record
    }

    /// One translation call per non-empty title; an empty title gets the
    /// failure marker without a call.
    async fn translate_title(&self, index: usize, title: &str) -> String {
        if title.is_empty() {
            return TRANSLATION_FAILED.to_string();
        }

        match self
            .translator
            .translate(title, &self.source_lang, &self.dest_lang)
            .await
        {
            Ok(translated) => {
                debug!(index, %title, %translated, "Translated title");
                translated
            }
            Err(e) => {
                warn!(index, %title, error = %e, "Title translation failed");
                TRANSLATION_FAILED.to_string()
            }
        }
    }

    async fn store_image(&self, index: usize, image_ref: Option<&str>) -> Option<PathBuf> {
        let url = image_ref?;
        match fetch_and_store(&self.client, url, &self.output_dir).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(index, %url, error = %e, "Image fetch failed");
                None
            }
        }
    }
}
