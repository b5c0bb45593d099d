//! Entity list loading.
//!
//! The entity list is a JSON array of records describing organisations of
//! interest. Only each record's `name` matters to a run; any other fields
//! (homepage, news page, ...) are accepted and ignored.
//!
//! ```json
//! [
//!   { "name": "Oxfam", "homepage": "https://www.oxfam.org.uk" },
//!   { "name": "British Red Cross" }
//! ]
//! ```

use crate::errors::ConfigError;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, instrument};

/// One record from the entity list. Fields other than `name` are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityRecord {
    pub name: Option<Value>,
}

impl EntityRecord {
    fn usable_name(&self) -> Option<&str> {
        match &self.name {
            Some(Value::String(name)) if !name.trim().is_empty() => Some(name),
            _ => None,
        }
    }
}

/// Load the entity list at `path` and return every record's name, lower-cased,
/// in file order.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, is not a JSON array of
/// objects, or if any record has no string `name` (absent, null, non-string
/// or blank). A single bad record fails the whole list.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_entity_names(path: &Path) -> Result<Vec<String>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<EntityRecord> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::MalformedEntities {
            path: path.to_path_buf(),
            source,
        })?;

    let names = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .usable_name()
                .map(str::to_lowercase)
                .ok_or_else(|| ConfigError::MissingName {
                    path: path.to_path_buf(),
                    index,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(count = names.len(), "Loaded entity list");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_list(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("entities.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_names_are_lowercased_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_list(
            &dir,
            r#"[
                {"name": "Oxfam", "homepage": "https://www.oxfam.org.uk", "news": null},
                {"name": "British Red Cross"}
            ]"#,
        );
        let names = load_entity_names(&path).unwrap();
        assert_eq!(names, vec!["oxfam", "british red cross"]);
    }

    #[test]
    fn test_empty_list_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_list(&dir, "[]");
        assert!(load_entity_names(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_entity_names(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn test_not_an_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_list(&dir, r#"{"name": "Oxfam"}"#);
        let err = load_entity_names(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedEntities { .. }));
    }

    #[test]
    fn test_truncated_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_list(&dir, r#"[{"name": "Oxfam"}"#);
        let err = load_entity_names(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedEntities { .. }));
    }

    #[test]
    fn test_record_without_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_list(&dir, r#"[{"name": "Oxfam"}, {"homepage": "https://x.org"}]"#);
        match load_entity_names(&path).unwrap_err() {
            ConfigError::MissingName { index, .. } => assert_eq!(index, 1),
            other => panic!("expected MissingName, got {other:?}"),
        }
    }

    #[test]
    fn test_null_numeric_and_blank_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for body in [r#"[{"name": null}]"#, r#"[{"name": 42}]"#, r#"[{"name": "  "}]"#] {
            let path = write_list(&dir, body);
            assert!(
                matches!(load_entity_names(&path), Err(ConfigError::MissingName { index: 0, .. })),
                "body {body} should be rejected"
            );
        }
    }

    #[test]
    fn test_shipped_entity_list_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/entities.json");
        let names = load_entity_names(&path).unwrap();
        assert!(names.contains(&"oxfam".to_string()));
        assert!(names.iter().all(|n| *n == n.to_lowercase()));
    }
}
