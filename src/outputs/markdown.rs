//! Text rendering of a run's two artifacts.
//!
//! - [`render_roundup`]: every source with its recent articles, as Markdown
//! - [`render_summary`]: the ranked top articles, in Slack `mrkdwn` link syntax
//!
//! Both are pure projections of structures the pipeline already computed.
//!
//! # Full roundup
//!
//! ```text
//! ### Third Sector
//! - [Charity announces new funding partnership](https://...) (2025-05-06)
//!
//! ### BBC News (Charity Topic)
//! No recent articles found.
//!
//! ```

use crate::models::{GroupedDigest, RankedSummary};
use std::fmt::Write;

/// Heading and period wording for the ranked summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStyle {
    pub title: String,
    pub window_days: u32,
}

impl SummaryStyle {
    /// "seven days" / "week" for the default window, plain counts otherwise.
    fn period_phrases(&self) -> (String, String) {
        match self.window_days {
            1 => ("day".to_string(), "day".to_string()),
            7 => ("seven days".to_string(), "week".to_string()),
            n => (format!("{n} days"), format!("{n} days")),
        }
    }
}

pub fn render_roundup(digest: &GroupedDigest) -> String {
    let mut out = String::new();
    for group in &digest.groups {
        let _ = writeln!(out, "### {}", group.source);
        if group.articles.is_empty() {
            out.push_str("No recent articles found.\n");
        }
        for article in &group.articles {
            let _ = writeln!(
                out,
                "- [{}]({}) ({})",
                article.title,
                article.link,
                article.published_date()
            );
        }
        out.push('\n');
    }
    out
}

pub fn render_summary(ranked: &RankedSummary, style: &SummaryStyle) -> String {
    let (span, period) = style.period_phrases();
    let mut out = String::new();
    let _ = writeln!(out, "*{}* :bell:\n", style.title);

    if ranked.is_empty() {
        let _ = writeln!(out, "No high-priority news found in the past {span}.");
        let _ = writeln!(
            out,
            "_All links from the past {period} are provided below for your reference._"
        );
        return out;
    }

    let _ = writeln!(out, "Here are the top news items from the past {period}:\n");
    for (i, item) in ranked.items.iter().enumerate() {
        let _ = writeln!(out, "{}. <{}|{}>", i + 1, item.article.link, item.article.title);
    }
    out.push_str("\n_See the full roundup below for more stories and sources._\n");
    out
}
