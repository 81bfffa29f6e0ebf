//! # Opinion Digest
//!
//! Scrapes the five most recent articles from the El País opinion
//! section, translates their titles into English, downloads each
//! article's lead image, and reports word frequencies over the
//! translated titles.
//!
//! ## Usage
//!
//! ```sh
//! opinion_digest -o ./images --translate-url http://localhost:5000/translate
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Listing**: Fetch the section page, waiting (bounded) for it to
//!    contain article elements
//! 2. **Extraction**: Pull title/snippet/image fields out of the first
//!    five article elements, with per-field fallbacks
//! 3. **Enrichment**: Translate each title and download each image
//!    concurrently; faults are absorbed per record, per field
//! 4. **Analysis & output**: Word frequencies over the translated
//!    titles, logged summary, JSON run report
//!
//! A run with partial failures still completes and reports whatever
//! subset succeeded; only an unusable output directory is fatal.

use chrono::Local;
use clap::Parser;
use itertools::Itertools;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analyze;
mod assets;
mod cli;
mod extract;
mod models;
mod outputs;
mod page;
mod pipeline;
mod translate;
mod utils;

use analyze::word_frequencies;
use cli::Cli;
use extract::extract_articles;
use models::RunReport;
use page::wait_for_listing;
use pipeline::Pipeline;
use translate::{HttpTranslator, RetryTranslate};
use utils::ensure_writable_dir;

/// Per-request bound; keeps a stalled remote from holding up the run.
const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("opinion_digest starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.section_url, ?args.output_dir, ?args.translate_url, "Parsed CLI arguments");

    let section_url = url::Url::parse(&args.section_url)?;

    // Early check: the output directory must exist and be writable before
    // any image fetch runs.
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        tracing::error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

    // ---- Fetch the listing and extract records ----
    let listing = wait_for_listing(
        &client,
        section_url.as_str(),
        Duration::from_secs(args.wait_secs),
    )
    .await;

    let records = extract_articles(&listing, &section_url, args.limit);
    if records.is_empty() {
        warn!("No articles found");
    }

    // ---- Enrich: translate titles, download images ----
    let translator = RetryTranslate::new(
        HttpTranslator::new(client.clone(), args.translate_url.clone()),
        3,
        Duration::from_millis(500),
    );
    let pipeline = Pipeline::new(
        translator,
        client.clone(),
        &args.output_dir,
        &args.source_lang,
        &args.dest_lang,
    );
    let articles = pipeline.enrich(records).await;

    // ---- Analyze translated titles ----
    let translated_titles: Vec<String> = articles
        .iter()
        .filter_map(|a| a.translated_title.clone())
        .collect();
    let word_counts = word_frequencies(&translated_titles);

    // ---- Report ----
    for (index, article) in articles.iter().enumerate() {
        info!(
            index,
            title = %article.title,
            translated_title = article.translated_title.as_deref().unwrap_or_default(),
            content = %article.content,
            image = %article
                .local_image_path
                .as_deref()
                .unwrap_or_else(|| Path::new(""))
                .display(),
            "Article"
        );
    }
    for (word, count) in word_counts
        .iter()
        .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
    {
        info!(%word, count, "Repeated word in titles");
    }

    let report = RunReport {
        local_date: Local::now().date_naive().to_string(),
        section_url: section_url.to_string(),
        articles,
        word_counts,
    };
    if let Err(e) = outputs::json::write_report(&report, Path::new(&args.output_dir)).await {
        tracing::error!(error = %e, "Failed to write run report");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        articles = report.articles.len(),
        "Execution complete"
    );

    Ok(())
}
