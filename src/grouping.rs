//! Grouping of the surviving articles by source.

use crate::models::{Article, GroupedDigest, SourceDescriptor, SourceGroup};

/// Partition `articles` by source.
///
/// Every registered source gets a group, in registry order, even when none of
/// its articles survived; the roundup still lists it. An article from a
/// source outside the registry opens a new group at the end, in first-seen
/// order. Articles keep their encounter order within a group, and every
/// article lands in exactly one group.
pub fn group(sources: &[SourceDescriptor], articles: &[Article]) -> GroupedDigest {
    let mut groups: Vec<SourceGroup> = sources
        .iter()
        .map(|s| SourceGroup {
            source: s.name.clone(),
            articles: Vec::new(),
        })
        .collect();

    for article in articles {
        match groups.iter_mut().find(|g| g.source == article.source) {
            Some(group) => group.articles.push(article.clone()),
            None => groups.push(SourceGroup {
                source: article.source.clone(),
                articles: vec![article.clone()],
            }),
        }
    }

    GroupedDigest { groups }
}
