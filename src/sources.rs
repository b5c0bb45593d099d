//! The source registry: which feeds a run polls, and in what order.
//!
//! Registry order is processing order, and therefore the order of the
//! sections in the full roundup.

use crate::errors::ConfigError;
use crate::models::SourceDescriptor;
use std::collections::HashSet;
use url::Url;

const DEFAULT_SOURCES: &[(&str, &str)] = &[
    ("Charity Today", "https://www.charitytoday.co.uk/feed/"),
    ("Third Sector", "https://www.thirdsector.co.uk/rss/news"),
    (
        "BBC News (Charity Topic)",
        "https://feeds.bbci.co.uk/news/topics/c9z6w63q5elt/rss.xml",
    ),
];

/// The built-in registry of UK charity-sector feeds.
pub fn default_sources() -> Vec<SourceDescriptor> {
    DEFAULT_SOURCES
        .iter()
        .filter_map(|(name, endpoint)| {
            Url::parse(endpoint)
                .ok()
                .map(|url| SourceDescriptor::new(*name, url))
        })
        .collect()
}

/// Reject registries that cannot be processed: empty ones, and ones where two
/// feeds share a name.
pub fn validate_registry(sources: &[SourceDescriptor]) -> Result<(), ConfigError> {
    if sources.is_empty() {
        return Err(ConfigError::Invalid {
            field: "sources",
            reason: "at least one source is required".to_string(),
        });
    }
    let mut seen = HashSet::new();
    for source in sources {
        if !seen.insert(source.name.as_str()) {
            return Err(ConfigError::DuplicateSource {
                name: source.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources_order() {
        let names: Vec<_> = default_sources().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["Charity Today", "Third Sector", "BBC News (Charity Topic)"]
        );
    }

    #[test]
    fn test_default_registry_is_valid() {
        assert!(validate_registry(&default_sources()).is_ok());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let url = Url::parse("https://example.org/rss").unwrap();
        let sources = vec![
            SourceDescriptor::new("Same", url.clone()),
            SourceDescriptor::new("Same", url),
        ];
        match validate_registry(&sources) {
            Err(ConfigError::DuplicateSource { name }) => assert_eq!(name, "Same"),
            other => panic!("expected duplicate source error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(matches!(
            validate_registry(&[]),
            Err(ConfigError::Invalid { field: "sources", .. })
        ));
    }
}
