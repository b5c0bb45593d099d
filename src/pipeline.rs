//! One roundup run, from registry to ranked and grouped articles.
//!
//! Sources are processed strictly one after another:
//!
//! 1. **Fetch** the feed (one attempt; a failure leaves the source empty)
//! 2. **Normalize** entries into articles, skipping bad entries
//! 3. **Filter** to the window, using one cutoff fixed at the start of the run
//! 4. **Pause** a random, bounded interval before the next source
//!
//! Once every source is in, the collected articles are scored and ranked,
//! and separately grouped by source. Nothing here renders text; that is left
//! to [`crate::outputs`].

use crate::fetcher::{FeedSource, Pacer};
use crate::grouping::group;
use crate::models::{Article, GroupedDigest, RankedSummary, SourceDescriptor};
use crate::normalizer::normalize;
use crate::ranking::rank;
use crate::scoring::Scorer;
use crate::window::TimeWindow;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Everything a run produced, ready to be rendered or serialized.
#[derive(Debug, Clone)]
pub struct DigestRun {
    /// The "now" the window was measured from.
    pub generated_at: DateTime<Utc>,
    /// The single cutoff every source was filtered against.
    pub cutoff: DateTime<Utc>,
    /// All surviving articles, in source order then feed order.
    pub articles: Vec<Article>,
    pub ranked: RankedSummary,
    pub grouped: GroupedDigest,
    /// Names of sources whose fetch failed.
    pub failed_sources: Vec<String>,
    /// Politeness delays taken between sources, in order.
    pub delays: Vec<Duration>,
}

pub struct Pipeline<'a, F> {
    sources: &'a [SourceDescriptor],
    scorer: &'a Scorer,
    fetcher: F,
    pacer: Pacer,
    window: chrono::Duration,
    top_n: usize,
}

impl<'a, F: FeedSource> Pipeline<'a, F> {
    pub fn new(
        sources: &'a [SourceDescriptor],
        scorer: &'a Scorer,
        fetcher: F,
        pacer: Pacer,
        window: chrono::Duration,
        top_n: usize,
    ) -> Self {
        Self {
            sources,
            scorer,
            fetcher,
            pacer,
            window,
            top_n,
        }
    }

    /// Run every source through the pipeline with the window ending at `now`.
    ///
    /// Per-source failures are logged and recorded in
    /// [`DigestRun::failed_sources`]; they never make the run fail.
    #[instrument(level = "info", skip_all, fields(sources = self.sources.len(), %now))]
    pub async fn run(&mut self, now: DateTime<Utc>) -> DigestRun {
        let window = TimeWindow::ending_at(now, self.window);
        info!(cutoff = %window.cutoff(), "Filtering to articles published after cutoff");

        let sources = self.sources;
        let mut articles = Vec::new();
        let mut failed_sources = Vec::new();
        let mut delays = Vec::new();

        for (i, source) in sources.iter().enumerate() {
            if i > 0 {
                delays.push(self.pacer.pause().await);
            }

            let raw = match self.fetcher.fetch(source).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(source = %source.name, error = %e, "Fetch failed; source contributes no articles");
                    failed_sources.push(source.name.clone());
                    String::new()
                }
            };

            let normalized = normalize(&raw, &source.name);
            let parsed = normalized.len();
            let recent = window.retain(normalized);
            info!(
                source = %source.name,
                parsed,
                recent = recent.len(),
                "Processed source"
            );
            articles.extend(recent);
        }

        let ranked = rank(&articles, self.scorer, self.top_n);
        let grouped = group(sources, &articles);
        info!(
            articles = articles.len(),
            ranked = ranked.len(),
            failed = failed_sources.len(),
            "Run complete"
        );

        DigestRun {
            generated_at: now,
            cutoff: window.cutoff(),
            articles,
            ranked,
            grouped,
            failed_sources,
            delays,
        }
    }
}
