//! Utility functions for filename sanitizing, logging, and file system
//! checks.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Replace filesystem-reserved characters in a filename with `_`.
///
/// The reserved set is `< > : " / \ | ? *`. All other characters pass
/// through unchanged, so the function is idempotent and never fails;
/// empty input yields empty output.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sanitize_filename("photo.jpg"), "photo.jpg");
/// assert_eq!(sanitize_filename("a/b?c.jpg"), "a_b_c.jpg");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.replace(
        |c: char| matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'),
        "_",
    )
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte
/// count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", &s[..max], s.len() - max)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test
/// by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not
/// writable (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_every_reserved_character() {
        assert_eq!(sanitize_filename(r#"<>:"/\|?*"#), "_________");
        assert_eq!(sanitize_filename("img?id=3/photo.jpg"), "img_id=3_photo.jpg");
    }

    #[test]
    fn test_sanitize_passes_clean_names_through() {
        assert_eq!(sanitize_filename("photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_filename("año-2025_01.webp"), "año-2025_01.webp");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["photo.jpg", r#"we:ird*name?.png"#, "", "<<>>"] {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once);
        }
    }

    #[test]
    fn test_sanitize_output_has_no_reserved_characters() {
        let sanitized = sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j"#);
        assert!(!sanitized.contains(|c: char| matches!(
            c,
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'
        )));
    }

    #[test]
    fn test_sanitize_empty_input() {
        assert_eq!(sanitize_filename(""), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let scratch = tempfile::tempdir().unwrap();
        let target = scratch.path().join("images");
        let target_str = target.to_str().unwrap();

        ensure_writable_dir(target_str).await.unwrap();
        assert!(target.is_dir());
    }
}
