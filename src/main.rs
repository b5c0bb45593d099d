//! # News Roundup
//!
//! Builds a weekly news digest from a fixed set of RSS/Atom feeds: recent
//! articles are collected per source, scored for relevance against a keyword
//! set and a list of named entities, and rendered as two text artifacts.
//!
//! ## Usage
//!
//! ```sh
//! news_roundup -e data/entities.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: settings and entity names are loaded and validated
//!    before any network traffic
//! 2. **Collection**: each feed is fetched, normalized and filtered to the
//!    window, one source at a time with a politeness pause in between
//! 3. **Ranking and grouping**: the top articles by score, and every article
//!    grouped by source
//! 4. **Output**: the full roundup and the ranked summary, plus an optional
//!    JSON snapshot

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod entities;
mod errors;
mod fetcher;
mod grouping;
mod models;
mod normalizer;
mod outputs;
mod pipeline;
mod ranking;
mod scoring;
mod sources;
mod utils;
mod window;

use cli::Cli;
use config::Settings;
use entities::load_entity_names;
use fetcher::{HttpFetcher, Pacer, seeded_rng};
use outputs::markdown::{SummaryStyle, render_roundup, render_summary};
use outputs::{Sink, emit, json};
use pipeline::Pipeline;
use scoring::Scorer;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("news_roundup starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration, all of it before the first request ----
    let settings = Settings::load(args.config.as_deref()).inspect_err(|e| {
        error!(error = %e, "Invalid settings");
    })?;
    let entity_names = load_entity_names(&args.entities).inspect_err(|e| {
        error!(error = %e, "Entity configuration could not be loaded; aborting before any fetch");
    })?;
    let scorer = Scorer::new(&settings.keywords, &entity_names);
    info!(
        sources = settings.sources.len(),
        keywords = scorer.keywords().len(),
        entities = scorer.entity_names().len(),
        window_days = settings.window_days,
        top_n = settings.top_n,
        "Configuration loaded"
    );

    let fetcher = HttpFetcher::new(
        settings.request_timeout(),
        &settings.user_agents,
        seeded_rng(args.seed, 0),
    )?;
    let pacer = Pacer::new(settings.delay_secs, seeded_rng(args.seed, 1));

    // ---- Collect, rank, group ----
    let mut pipeline = Pipeline::new(
        &settings.sources,
        &scorer,
        fetcher,
        pacer,
        settings.window(),
        settings.top_n,
    );
    let run = pipeline.run(Utc::now()).await;

    // ---- Output ----
    let roundup = render_roundup(&run.grouped);
    let summary = render_summary(
        &run.ranked,
        &SummaryStyle {
            title: settings.title.clone(),
            window_days: settings.window_days,
        },
    );

    let roundup_sink = match args.roundup_out.as_deref() {
        Some(path) => Sink::File(path),
        None => Sink::Stdout {
            banner: "Full Weekly News Roundup",
        },
    };
    let summary_sink = match args.summary_out.as_deref() {
        Some(path) => Sink::File(path),
        None => Sink::Stdout {
            banner: "Slack Message Summary",
        },
    };
    emit(roundup_sink, &roundup).await;
    emit(summary_sink, &summary).await;

    if let Some(dir) = args.json_output_dir.as_deref() {
        if let Err(e) = json::write_snapshot(&run, dir).await {
            error!(path = %dir, error = %e, "Failed to write JSON snapshot");
        }
    }

    for group in &run.grouped.groups {
        info!(source = %group.source, count = group.articles.len(), "Source summary");
    }
    let waited: std::time::Duration = run.delays.iter().sum();
    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = run.grouped.article_count(),
        ranked = run.ranked.len(),
        failed_sources = ?run.failed_sources,
        ?waited,
        "Execution complete"
    );

    Ok(())
}
