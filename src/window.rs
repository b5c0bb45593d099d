//! The trailing time window articles must fall inside.

use crate::models::Article;
use chrono::{DateTime, Duration, Utc};

/// A window ending at the start of the run.
///
/// The cutoff is fixed when the window is built, so every source in a run is
/// filtered against exactly the same instant no matter how long fetching takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    cutoff: DateTime<Utc>,
}

impl TimeWindow {
    pub fn ending_at(now: DateTime<Utc>, length: Duration) -> Self {
        Self {
            cutoff: now - length,
        }
    }

    pub fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff
    }

    /// Strictly after the cutoff: an article stamped exactly at it is dropped.
    pub fn keep(&self, article: &Article) -> bool {
        article.published_at > self.cutoff
    }

    pub fn retain(&self, mut articles: Vec<Article>) -> Vec<Article> {
        articles.retain(|a| self.keep(a));
        articles
    }
}
