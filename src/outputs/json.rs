//! JSON run-report output.
//!
//! One file per run date, written into the image output directory:
//! `{output_dir}/report_{YYYY-MM-DD}.json`.

use crate::models::RunReport;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Serialize the run report and write it under `output_dir`.
///
/// Returns the path written. A report from an earlier run on the same
/// date is overwritten.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_report(report: &RunReport, output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    let report_path = output_dir.join(format!("report_{}.json", report.local_date));

    fs::write(&report_path, json).await?;
    info!(path = %report_path.display(), "Wrote run report");

    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleRecord;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_write_report_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let report = RunReport {
            local_date: "2025-11-03".to_string(),
            section_url: "https://elpais.com/opinion/".to_string(),
            articles: vec![ArticleRecord::new(
                "El Futuro".to_string(),
                "Resumen".to_string(),
                None,
            )],
            word_counts: HashMap::from([("future".to_string(), 1)]),
        };

        let written = write_report(&report, dir.path()).await.unwrap();
        assert_eq!(written, dir.path().join("report_2025-11-03.json"));

        let raw = std::fs::read_to_string(&written).unwrap();
        let parsed: RunReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.articles.len(), 1);
        assert_eq!(parsed.word_counts["future"], 1);
    }
}
