//! Relevance scoring from keyword and entity-name matches in article titles.
//!
//! Each keyword found in the lower-cased title adds [`KEYWORD_POINTS`]; each
//! entity name found adds [`ENTITY_POINTS`]. Matching is plain substring
//! containment, so "grant" also matches "grants" and "migrant". Scores are
//! uncapped.

use crate::models::Article;
use itertools::Itertools;

pub const KEYWORD_POINTS: u32 = 2;
pub const ENTITY_POINTS: u32 = 5;

/// Scoring vocabulary for a run: the keyword set and the entity names.
///
/// Built once at the start of a run and passed by reference to whatever
/// needs to score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorer {
    keywords: Vec<String>,
    entity_names: Vec<String>,
}

impl Scorer {
    /// Both lists are lower-cased and deduplicated (first occurrence wins),
    /// so a term repeated in the configuration still scores once.
    pub fn new<K, E>(keywords: K, entity_names: E) -> Self
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            keywords: normalize_terms(keywords),
            entity_names: normalize_terms(entity_names),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn entity_names(&self) -> &[String] {
        &self.entity_names
    }

    pub fn score(&self, title: &str) -> u32 {
        let title = title.to_lowercase();
        let hits = |terms: &[String]| terms.iter().filter(|t| title.contains(t.as_str())).count() as u32;
        KEYWORD_POINTS * hits(&self.keywords) + ENTITY_POINTS * hits(&self.entity_names)
    }

    pub fn score_article(&self, article: &Article) -> u32 {
        self.score(&article.title)
    }
}

fn normalize_terms<I>(terms: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| t.as_ref().to_lowercase())
        .filter(|t| !t.is_empty())
        .unique()
        .collect()
}
