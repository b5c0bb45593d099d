//! Output generation: text artifacts, their sinks, and the JSON snapshot.
//!
//! # Submodules
//!
//! - [`markdown`]: Renders the full roundup and the ranked summary
//! - [`json`]: Writes the structured run to a dated JSON file
//!
//! The two text artifacts go to stdout unless a file path is given for them.

pub mod json;
pub mod markdown;

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Where one text artifact should go.
#[derive(Debug, Clone, Copy)]
pub enum Sink<'a> {
    /// Print under a banner line.
    Stdout { banner: &'a str },
    File(&'a Path),
}

/// Write `text` to `path`, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_text(path: &Path, text: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, text).await?;
    info!(bytes = text.len(), "Wrote artifact");
    Ok(())
}

/// Deliver one artifact. A failed file write is logged, not propagated: the
/// other artifact and the run's exit status are unaffected.
pub async fn emit(sink: Sink<'_>, text: &str) {
    match sink {
        Sink::Stdout { banner } => {
            println!("\n\n--- {banner} ---\n");
            println!("{text}");
        }
        Sink::File(path) => {
            if let Err(e) = write_text(path, text).await {
                error!(path = %path.display(), error = %e, "Failed to write artifact");
            }
        }
    }
}
