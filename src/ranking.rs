//! Ranking: the top-N articles by relevance.

use crate::models::{Article, RankedSummary, ScoredArticle};
use crate::scoring::Scorer;
use std::cmp::Reverse;

/// Score every article and keep the `limit` best, highest score first.
///
/// The sort is stable, so articles with equal scores stay in the order they
/// were given in, which is source processing order, then feed order.
/// Zero-score articles are still eligible when fewer than `limit` articles
/// score above zero.
pub fn rank(articles: &[Article], scorer: &Scorer, limit: usize) -> RankedSummary {
    let mut items: Vec<ScoredArticle> = articles
        .iter()
        .map(|article| ScoredArticle {
            score: scorer.score_article(article),
            article: article.clone(),
        })
        .collect();
    items.sort_by_key(|item| Reverse(item.score));
    items.truncate(limit);
    RankedSummary { items }
}
