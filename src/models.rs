//! Data models for scraped articles and the run report.
//!
//! This module defines the core data structures used throughout the
//! application:
//! - [`ArticleRecord`]: One article from the opinion listing, filled in two
//!   stages (extraction, then enrichment)
//! - [`RunReport`]: Everything a single run produced, serialized to JSON
//!
//! It also hosts the canonical fallback values substituted when a field
//! cannot be extracted or enriched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Fallback body text when an article element has no paragraph.
pub const CONTENT_UNAVAILABLE: &str = "Content unavailable";

/// Fallback translated title when the translation call fails or there is
/// no title to translate.
pub const TRANSLATION_FAILED: &str = "Translation failed";

/// A single article from the opinion section listing.
///
/// Created by the extractor with `title`, `content`, and `image_ref`
/// populated; the enrichment pipeline then fills `translated_title` and
/// `local_image_path`. After enrichment, `translated_title` is always
/// `Some` (possibly [`TRANSLATION_FAILED`]) and no record is ever
/// dropped on the way through.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// The article headline as shown on the listing page. May be empty if
    /// the heading link carried no text.
    pub title: String,
    /// The body snippet, or [`CONTENT_UNAVAILABLE`] when the listing shows
    /// none.
    pub content: String,
    /// Absolute URL of the article's first image, when one was present.
    pub image_ref: Option<String>,
    /// Where the image was stored on disk, when the download succeeded.
    pub local_image_path: Option<PathBuf>,
    /// The headline translated into the destination language.
    pub translated_title: Option<String>,
}

impl ArticleRecord {
    /// Build a freshly extracted record with enrichment fields unset.
    pub fn new(title: String, content: String, image_ref: Option<String>) -> Self {
        Self {
            title,
            content,
            image_ref,
            local_image_path: None,
            translated_title: None,
        }
    }
}

/// The full output of one run: the enriched articles plus the word
/// frequencies computed over their translated titles.
#[derive(Debug, Deserialize, Serialize)]
pub struct RunReport {
    /// The date the run executed, `YYYY-MM-DD`.
    pub local_date: String,
    /// The listing page the articles came from.
    pub section_url: String,
    /// The enriched articles, in listing order.
    pub articles: Vec<ArticleRecord>,
    /// Lowercase word token to occurrence count over translated titles.
    pub word_counts: HashMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_record_new() {
        let record = ArticleRecord::new(
            "El Futuro".to_string(),
            "Un artículo de opinión".to_string(),
            Some("https://example.com/photo.jpg".to_string()),
        );
        assert_eq!(record.title, "El Futuro");
        assert_eq!(record.content, "Un artículo de opinión");
        assert_eq!(
            record.image_ref.as_deref(),
            Some("https://example.com/photo.jpg")
        );
        assert!(record.local_image_path.is_none());
        assert!(record.translated_title.is_none());
    }

    #[test]
    fn test_run_report_serialization() {
        let mut word_counts = HashMap::new();
        word_counts.insert("future".to_string(), 2);

        let report = RunReport {
            local_date: "2025-11-03".to_string(),
            section_url: "https://elpais.com/opinion/".to_string(),
            articles: vec![ArticleRecord::new(
                "El Futuro".to_string(),
                CONTENT_UNAVAILABLE.to_string(),
                None,
            )],
            word_counts,
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("2025-11-03"));
        assert!(json.contains("El Futuro"));
        assert!(json.contains("\"future\":2"));
    }

    #[test]
    fn test_run_report_deserialization() {
        let json = r#"{
            "local_date": "2025-11-03",
            "section_url": "https://elpais.com/opinion/",
            "articles": [],
            "word_counts": {}
        }"#;

        let report: RunReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.local_date, "2025-11-03");
        assert!(report.articles.is_empty());
        assert!(report.word_counts.is_empty());
    }
}
