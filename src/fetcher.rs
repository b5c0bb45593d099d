//! Feed retrieval and request pacing.
//!
//! Feeds are fetched one at a time. Each request carries a `User-Agent` drawn
//! at random from a small pool of browser strings, and the pipeline pauses for
//! a random, bounded interval between two sources so the sites being polled
//! see a light, irregular load.
//!
//! Both random choices come from [`StdRng`] values handed in by the caller,
//! so a seeded run makes the same choices every time.

use crate::config::DelayRange;
use crate::errors::{ConfigError, FetchError};
use crate::models::SourceDescriptor;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Browser identities rotated across requests.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
];

/// Build an RNG for one consumer of randomness.
///
/// With a seed, each `stream` gets its own deterministic sequence; without
/// one, the RNG is seeded from the operating system.
pub fn seeded_rng(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_os_rng(),
    }
}

/// Anything that can return the raw body of a source's feed.
///
/// [`HttpFetcher`] is the real implementation; tests substitute canned
/// bodies and failures.
pub trait FeedSource {
    /// Fetch the feed for `source`, making exactly one attempt.
    async fn fetch(&mut self, source: &SourceDescriptor) -> Result<String, FetchError>;
}

/// Fetches feeds over HTTP with a bounded timeout and a rotating `User-Agent`.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    user_agents: Vec<String>,
    rng: StdRng,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout`.
    ///
    /// Blank entries in `user_agents` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the pool has no usable entry, or
    /// [`ConfigError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(
        timeout: Duration,
        user_agents: &[String],
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        let user_agents: Vec<String> = user_agents
            .iter()
            .map(|ua| ua.trim())
            .filter(|ua| !ua.is_empty())
            .map(str::to_string)
            .collect();
        if user_agents.is_empty() {
            return Err(ConfigError::Invalid {
                field: "user_agents",
                reason: "at least one non-empty value is required".to_string(),
            });
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            user_agents,
            rng,
        })
    }

    /// Draw the `User-Agent` for the next request.
    pub fn pick_user_agent(&mut self) -> String {
        self.user_agents
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }
}

impl FeedSource for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(source = %source.name, url = %source.endpoint))]
    async fn fetch(&mut self, source: &SourceDescriptor) -> Result<String, FetchError> {
        let url = source.endpoint.to_string();
        let user_agent = self.pick_user_agent();
        debug!(%user_agent, "Requesting feed");

        let response = self
            .client
            .get(source.endpoint.clone())
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| classify(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| classify(&url, e))?;
        info!(bytes = body.len(), "Fetched feed");
        Ok(body)
    }
}

fn classify(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Randomized pause taken between two consecutive feed requests.
#[derive(Debug)]
pub struct Pacer {
    range: DelayRange,
    rng: StdRng,
}

impl Pacer {
    pub fn new(range: DelayRange, rng: StdRng) -> Self {
        Self { range, rng }
    }

    /// Draw the next delay, uniformly within the configured bounds.
    pub fn next_delay(&mut self) -> Duration {
        let DelayRange { min, max } = self.range;
        if max <= min {
            return Duration::from_secs_f64(min.max(0.0));
        }
        Duration::from_secs_f64(self.rng.random_range(min..=max))
    }

    /// Sleep for the next delay and return how long that was.
    pub async fn pause(&mut self) -> Duration {
        let delay = self.next_delay();
        debug!(?delay, "Pausing before next source");
        sleep(delay).await;
        delay
    }
}
