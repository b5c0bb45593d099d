//! Data models for one roundup run.
//!
//! This module defines the values that flow through the pipeline:
//! - [`SourceDescriptor`]: A feed to poll, identified by its name
//! - [`Article`]: One normalized feed entry
//! - [`ScoredArticle`]: An article paired with its relevance score for this run
//! - [`GroupedDigest`]: All surviving articles partitioned by source
//! - [`RankedSummary`]: The highest scoring articles, best first
//!
//! Every value is built fresh for a run and dropped at the end of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A news feed to poll.
///
/// The `name` is the source's identity: it labels every article the feed
/// contributes and heads its section of the roundup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Display name, unique within the registry.
    pub name: String,
    /// Feed URL (RSS or Atom).
    pub endpoint: Url,
}

impl SourceDescriptor {
    pub fn new(name: impl Into<String>, endpoint: Url) -> Self {
        Self {
            name: name.into(),
            endpoint,
        }
    }
}

/// A normalized feed entry.
///
/// The feed parser trims the title's outer whitespace; otherwise title and
/// link are kept exactly as the feed published them. Two sources
/// may contribute articles with the same link; nothing here deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Name of the source that published the entry.
    pub source: String,
    /// Headline as published, with surrounding whitespace trimmed.
    pub title: String,
    /// Link to the story as published.
    pub link: String,
    /// Publication time, falling back to the entry's update time.
    pub published_at: DateTime<Utc>,
}

impl Article {
    /// Publication date as `YYYY-MM-DD`, the form used in the roundup.
    pub fn published_date(&self) -> String {
        self.published_at.format("%Y-%m-%d").to_string()
    }
}

/// An [`Article`] with the relevance score it earned in this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: Article,
    pub score: u32,
}

/// One source's section of the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceGroup {
    pub source: String,
    pub articles: Vec<Article>,
}

/// Surviving articles partitioned by source.
///
/// Groups are ordered by first appearance of their source; articles within a
/// group keep the order they were encountered in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedDigest {
    pub groups: Vec<SourceGroup>,
}

impl GroupedDigest {
    /// Total number of articles across every group.
    pub fn article_count(&self) -> usize {
        self.groups.iter().map(|g| g.articles.len()).sum()
    }

    #[cfg(test)]
    pub fn get(&self, source: &str) -> Option<&SourceGroup> {
        self.groups.iter().find(|g| g.source == source)
    }
}

/// The top articles of a run, highest score first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankedSummary {
    pub items: Vec<ScoredArticle>,
}

impl RankedSummary {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
