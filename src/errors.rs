//! Error taxonomy for a roundup run.
//!
//! Only [`ConfigError`] is fatal: it is raised before any network activity and
//! aborts the run with no digest. [`FetchError`], [`FeedParseError`] and
//! [`EntryParseError`] are recovered where they occur and only ever reach the
//! log.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or unreadable run configuration (entity list, settings file).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a JSON array of entity records: {source}")]
    MalformedEntities {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("entity record #{index} in {path} has no usable \"name\" field")]
    MissingName { path: PathBuf, index: usize },

    #[error("{path} is not a valid settings file: {source}")]
    MalformedSettings {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("duplicate source name {name:?} in the registry")]
    DuplicateSource { name: String },

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("cannot build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// A single feed could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The fetched body is not a feed at all.
#[derive(Debug, Error)]
#[error("unparseable feed: {0}")]
pub struct FeedParseError(#[from] pub feed_rs::parser::ParseFeedError);

/// One feed entry could not be turned into an article.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryParseError {
    #[error("entry has no title")]
    MissingTitle,

    #[error("entry has no link")]
    MissingLink,

    #[error("entry has neither a published nor an updated date")]
    MissingDate,
}
