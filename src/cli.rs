//! Command-line interface definitions.
//!
//! All options have defaults matching the El País opinion section; the
//! translation endpoint can also come from the environment.

use clap::Parser;

/// Command-line arguments for opinion_digest.
///
/// # Examples
///
/// ```sh
/// # Defaults: El País opinion section, es -> en, ./images
/// opinion_digest
///
/// # Different target language and output location
/// opinion_digest --dest-lang fr -o /tmp/images
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// URL of the opinion-section listing page
    #[arg(long, default_value = "https://elpais.com/opinion/")]
    pub section_url: String,

    /// Directory for downloaded images and the run report
    #[arg(short, long, default_value = "./images")]
    pub output_dir: String,

    /// Language the article titles are written in
    #[arg(long, default_value = "es")]
    pub source_lang: String,

    /// Language to translate titles into
    #[arg(long, default_value = "en")]
    pub dest_lang: String,

    /// Translation endpoint (LibreTranslate-compatible)
    #[arg(long, env = "TRANSLATE_URL", default_value = "http://localhost:5000/translate")]
    pub translate_url: String,

    /// Maximum number of articles to take from the listing
    #[arg(long, default_value_t = 5)]
    pub limit: usize,

    /// Upper bound in seconds on waiting for the listing to populate
    #[arg(long, default_value_t = 15)]
    pub wait_secs: u64,
}
