//! JSON snapshot of a run.
//!
//! The snapshot carries the structured results behind the two text
//! artifacts (ranked articles with scores, grouped articles, the cutoff and
//! any failed sources) for consumers that store or display articles.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     └── digest.json
//! ```
//!
//! A second run on the same UTC day overwrites that day's snapshot.

use crate::models::{GroupedDigest, RankedSummary};
use crate::pipeline::DigestRun;
use crate::utils::ensure_writable_dir;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub generated_at: DateTime<Utc>,
    pub cutoff: DateTime<Utc>,
    pub failed_sources: &'a [String],
    pub ranked: &'a RankedSummary,
    pub grouped: &'a GroupedDigest,
}

impl<'a> From<&'a DigestRun> for Snapshot<'a> {
    fn from(run: &'a DigestRun) -> Self {
        Self {
            generated_at: run.generated_at,
            cutoff: run.cutoff,
            failed_sources: &run.failed_sources,
            ranked: &run.ranked,
            grouped: &run.grouped,
        }
    }
}

/// Write the snapshot of `run` under `json_output_dir`, one directory per day.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns an error if the directory is not writable or the write fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_snapshot(
    run: &DigestRun,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(&Snapshot::from(run))?;

    let day_dir = format!(
        "{}/{}",
        json_output_dir.trim_end_matches('/'),
        run.generated_at.format("%Y-%m-%d")
    );
    ensure_writable_dir(&day_dir).await?;

    let path = PathBuf::from(&day_dir).join("digest.json");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON snapshot");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, ScoredArticle, SourceGroup};
    use chrono::TimeZone;

    fn run() -> DigestRun {
        let now = Utc.with_ymd_and_hms(2025, 5, 8, 12, 0, 0).unwrap();
        let article = Article {
            source: "Third Sector".to_string(),
            title: "Oxfam announces funding round".to_string(),
            link: "https://www.thirdsector.co.uk/oxfam".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 5, 7, 9, 0, 0).unwrap(),
        };
        DigestRun {
            generated_at: now,
            cutoff: now - chrono::Duration::days(7),
            articles: vec![article.clone()],
            ranked: RankedSummary {
                items: vec![ScoredArticle {
                    article: article.clone(),
                    score: 7,
                }],
            },
            grouped: GroupedDigest {
                groups: vec![
                    SourceGroup {
                        source: "Third Sector".to_string(),
                        articles: vec![article],
                    },
                    SourceGroup {
                        source: "Charity Today".to_string(),
                        articles: vec![],
                    },
                ],
            },
            failed_sources: vec!["Charity Today".to_string()],
            delays: vec![],
        }
    }

    #[tokio::test]
    async fn test_write_snapshot_layout_and_content() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();

        let path = write_snapshot(&run(), dir).await.unwrap();
        assert_eq!(path, tmp.path().join("2025-05-08").join("digest.json"));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["cutoff"], "2025-05-01T12:00:00Z");
        assert_eq!(written["failed_sources"][0], "Charity Today");
        assert_eq!(written["ranked"]["items"][0]["score"], 7);
        assert_eq!(written["ranked"]["items"][0]["source"], "Third Sector");
        assert_eq!(written["grouped"]["groups"][1]["articles"], serde_json::json!([]));
    }
}
