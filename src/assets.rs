//! Image download and storage.
//!
//! [`fetch_and_store`] pulls one image from its URL and writes it under
//! the output directory, named by the sanitized trailing path segment of
//! the URL. The status is checked before anything touches the disk and
//! the payload is written in one shot, so a failed download never leaves
//! a partial file behind. Name collisions are last-write-wins.
//!
//! The output directory is created once at startup by the runner; this
//! module assumes it exists.

use crate::utils::sanitize_filename;
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};
use url::Url;

/// A failure while downloading or storing one image.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL would not parse at all.
    #[error("invalid image url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL has no non-empty trailing path segment to name a file by.
    #[error("no usable filename in {0}")]
    NoFilename(String),
    /// The request never completed (connect failure, timeout, ...).
    #[error("download request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The remote answered with a non-success status.
    #[error("remote returned {0}")]
    RemoteStatus(StatusCode),
    /// The payload could not be written to disk.
    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// Derive the local filename for an image URL: the last non-empty path
/// segment, sanitized.
fn filename_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).next_back()?;
    Some(sanitize_filename(segment))
}

/// Download `url` and store it under `output_dir`.
///
/// Returns the path the image was written to. A non-success response is
/// reported as [`FetchError::RemoteStatus`] without creating any file.
/// An existing file at the resolved path is overwritten.
#[instrument(level = "info", skip(client), fields(%url))]
pub async fn fetch_and_store(
    client: &reqwest::Client,
    url: &str,
    output_dir: &Path,
) -> Result<PathBuf, FetchError> {
    let parsed = Url::parse(url)?;
    let filename =
        filename_from_url(&parsed).ok_or_else(|| FetchError::NoFilename(url.to_string()))?;
    let target = output_dir.join(filename);

    let response = client.get(parsed).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::RemoteStatus(status));
    }

    let payload = response.bytes().await?;
    fs::write(&target, &payload).await?;
    debug!(path = %target.display(), bytes = payload.len(), "Stored image");

    Ok(target)
}
