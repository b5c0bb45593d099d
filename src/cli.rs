//! Command-line interface definitions for the news roundup.
//!
//! Everything about *what* a run covers (sources, keywords, window) lives in
//! the optional YAML settings file; the flags here only say where inputs come
//! from and where artifacts go.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for a roundup run.
///
/// # Examples
///
/// ```sh
/// # Print both artifacts to stdout using the built-in registry
/// news_roundup
///
/// # Custom settings, artifacts to files, plus a JSON snapshot
/// news_roundup -c roundup.yaml --roundup-out out/roundup.md --summary-out out/slack.txt -j ./json
///
/// # Reproducible User-Agent picks and delays
/// NEWS_ROUNDUP_SEED=42 news_roundup
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON file listing the entities of interest
    #[arg(
        short,
        long,
        env = "NEWS_ROUNDUP_ENTITIES",
        default_value = "data/entities.json"
    )]
    pub entities: PathBuf,

    /// Write the full roundup here instead of stdout
    #[arg(long)]
    pub roundup_out: Option<PathBuf>,

    /// Write the ranked summary here instead of stdout
    #[arg(long)]
    pub summary_out: Option<PathBuf>,

    /// Output directory for a dated JSON snapshot of the run
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Seed for the User-Agent and delay choices
    #[arg(long, env = "NEWS_ROUNDUP_SEED")]
    pub seed: Option<u64>,
}
