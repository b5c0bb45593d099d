//! Feed normalization: raw RSS/Atom text into [`Article`]s.
//!
//! Parsing is delegated to `feed-rs`, which handles RSS 0.9x/1.0/2.0, Atom
//! and JSON Feed and normalises their date fields. Each entry is then checked
//! on its own: an entry without a title, a link, or any usable date is logged
//! and skipped, and the rest of the feed is still processed.

use crate::errors::{EntryParseError, FeedParseError};
use crate::models::Article;
use crate::utils::truncate_for_log;
use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Link};
use feed_rs::parser;
use tracing::{debug, instrument, warn};

/// The fields of a feed entry the roundup cares about, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl From<Entry> for FeedEntry {
    fn from(entry: Entry) -> Self {
        Self {
            title: entry.title.map(|t| t.content),
            link: primary_link(entry.links),
            published: entry.published,
            updated: entry.updated,
        }
    }
}

/// Prefer the `alternate` link (the story page) and fall back to the first one.
fn primary_link(links: Vec<Link>) -> Option<String> {
    let alternate = links
        .iter()
        .position(|l| l.rel.as_deref() == Some("alternate"));
    links
        .into_iter()
        .nth(alternate.unwrap_or(0))
        .map(|l| l.href)
}

impl FeedEntry {
    /// The entry's publication time: `published` if present, else `updated`.
    pub fn publish_time(&self) -> Option<DateTime<Utc>> {
        self.published.or(self.updated)
    }

    /// Validate the entry and turn it into an [`Article`] attributed to `source`.
    pub fn into_article(self, source: &str) -> Result<Article, EntryParseError> {
        let published_at = self.publish_time().ok_or(EntryParseError::MissingDate)?;
        let title = self.title.ok_or(EntryParseError::MissingTitle)?;
        let link = self.link.ok_or(EntryParseError::MissingLink)?;
        Ok(Article {
            source: source.to_string(),
            title,
            link,
            published_at,
        })
    }
}

/// Parse feed text into entries, without validating them.
pub fn parse_entries(raw: &str) -> Result<Vec<FeedEntry>, FeedParseError> {
    let feed = parser::parse(raw.as_bytes())?;
    Ok(feed.entries.into_iter().map(FeedEntry::from).collect())
}

/// Normalize one source's raw feed into articles.
///
/// Empty input (what a failed fetch leaves behind) yields no articles. Input
/// that is not a feed at all is logged and also yields no articles; it never
/// aborts the run.
#[instrument(level = "info", skip_all, fields(source = %source_name, bytes = raw.len()))]
pub fn normalize(raw: &str, source_name: &str) -> Vec<Article> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let entries = match parse_entries(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, preview = %truncate_for_log(raw, 120), "Feed could not be parsed; source contributes no articles");
            return Vec::new();
        }
    };

    let total = entries.len();
    let articles: Vec<Article> = entries
        .into_iter()
        .filter_map(|entry| {
            let label = entry
                .title
                .clone()
                .or_else(|| entry.link.clone())
                .unwrap_or_default();
            match entry.into_article(source_name) {
                Ok(article) => Some(article),
                Err(e) => {
                    warn!(error = %e, entry = %truncate_for_log(&label, 80), "Skipping feed entry");
                    None
                }
            }
        })
        .collect();

    debug!(entries = total, articles = articles.len(), "Normalized feed");
    articles
}
