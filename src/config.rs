//! Run settings loaded from an optional YAML file.
//!
//! Every field has a default, so a run works with no file at all; a file only
//! needs the keys it overrides:
//!
//! ```yaml
//! title: Weekly Housing Sector Roundup
//! window_days: 7
//! top_n: 10
//! keywords: [funding, grant, eviction]
//! sources:
//!   - name: Inside Housing
//!     endpoint: https://www.insidehousing.co.uk/rss
//! delay_secs: { min: 1.0, max: 3.0 }
//! ```

use crate::errors::ConfigError;
use crate::fetcher::DEFAULT_USER_AGENTS;
use crate::models::SourceDescriptor;
use crate::sources::{default_sources, validate_registry};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Keywords that earn an article +2 each when found in its title.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "funding",
    "grant",
    "staffing",
    "redundancies",
    "changes",
    "appointments",
    "trend",
    "report",
    "research",
    "partnership",
];

/// Longest accepted window, in days.
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Longest accepted pause between two feed requests, in seconds.
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// Bounds, in seconds, of the pause taken between two feed requests.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelayRange {
    pub min: f64,
    pub max: f64,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self { min: 1.0, max: 3.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Heading of the ranked summary.
    pub title: String,
    pub sources: Vec<SourceDescriptor>,
    pub keywords: Vec<String>,
    /// Length of the trailing window, in days.
    pub window_days: u32,
    /// Maximum size of the ranked summary.
    pub top_n: usize,
    pub request_timeout_secs: u64,
    pub delay_secs: DelayRange,
    /// Pool the per-request `User-Agent` is drawn from.
    pub user_agents: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Weekly UK Charity Sector News Roundup".to_string(),
            sources: default_sources(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            window_days: 7,
            top_n: 10,
            request_timeout_secs: 10,
            delay_secs: DelayRange::default(),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or use the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid YAML
    /// for [`Settings`], or holds values that fail [`Settings::validate`].
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            None => Self::default(),
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| {
                    ConfigError::Unreadable {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                let settings: Settings =
                    serde_yaml::from_str(&raw).map_err(|source| ConfigError::MalformedSettings {
                        path: path.to_path_buf(),
                        source,
                    })?;
                info!(path = %path.display(), "Loaded settings file");
                settings
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_registry(&self.sources)?;
        if !(1..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(invalid(
                "window_days",
                format!("must be between 1 and {MAX_WINDOW_DAYS}, got {}", self.window_days),
            ));
        }
        if self.top_n == 0 {
            return Err(invalid("top_n", "must be at least 1"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be at least 1"));
        }
        let DelayRange { min, max } = self.delay_secs;
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max || max > MAX_DELAY_SECS {
            return Err(invalid(
                "delay_secs",
                format!("expected 0 <= min <= max <= {MAX_DELAY_SECS}, got min={min} max={max}"),
            ));
        }
        if self.user_agents.iter().all(|ua| ua.trim().is_empty()) {
            return Err(invalid("user_agents", "at least one non-empty value is required"));
        }
        Ok(())
    }

    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.window_days))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_match_weekly_charity_roundup() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.window_days, 7);
        assert_eq!(settings.top_n, 10);
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.delay_secs, DelayRange { min: 1.0, max: 3.0 });
        assert_eq!(settings.keywords.len(), 10);
        assert_eq!(settings.sources.len(), 3);
        assert_eq!(settings.user_agents.len(), 3);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundup.yaml");
        fs::write(
            &path,
            "title: Housing Roundup\ntop_n: 5\nsources:\n  - name: Inside Housing\n    endpoint: https://www.insidehousing.co.uk/rss\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.title, "Housing Roundup");
        assert_eq!(settings.top_n, 5);
        assert_eq!(settings.sources.len(), 1);
        assert_eq!(settings.sources[0].name, "Inside Housing");
        assert_eq!(settings.window_days, 7);
        assert_eq!(settings.keywords[0], "funding");
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn test_unknown_key_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundup.yaml");
        fs::write(&path, "windw_days: 3\n").unwrap();
        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedSettings { .. }));
    }

    #[test]
    fn test_inverted_delay_range_rejected() {
        let settings = Settings {
            delay_secs: DelayRange { min: 3.0, max: 1.0 },
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "delay_secs", .. })
        ));
    }

    #[test]
    fn test_zero_window_rejected() {
        let settings = Settings {
            window_days: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "window_days", .. })
        ));
    }

    #[test]
    fn test_blank_user_agent_pool_rejected() {
        let settings = Settings {
            user_agents: vec!["  ".to_string()],
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "user_agents", .. })
        ));
    }

    #[test]
    fn test_shipped_example_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("roundup.example.yaml");
        assert_eq!(Settings::load(Some(&path)).unwrap(), Settings::default());
    }

    #[test]
    fn test_oversized_window_rejected() {
        let settings = Settings {
            window_days: 200_000_000,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "window_days", .. })
        ));

        let longest = Settings {
            window_days: MAX_WINDOW_DAYS,
            ..Settings::default()
        };
        assert!(longest.validate().is_ok());
        let window = crate::window::TimeWindow::ending_at(chrono::Utc::now(), longest.window());
        assert!(window.cutoff() < chrono::Utc::now());
    }

    #[test]
    fn test_oversized_delay_rejected() {
        let settings = Settings {
            delay_secs: DelayRange { min: 0.0, max: 1e30 },
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "delay_secs", .. })
        ));

        let longest = Settings {
            delay_secs: DelayRange { min: 0.0, max: MAX_DELAY_SECS },
            ..Settings::default()
        };
        assert!(longest.validate().is_ok());
    }
}
