//! Single-article lookup and detail-view assembly.
//!
//! # Invariants
//! - Unpublished articles are invisible: never found, never a neighbor.
//! - Neighbors follow store order, not date order.

use crate::model::article::{Article, ArticleSummary};
use crate::query::related::related_articles;
use serde::Serialize;

/// Returns the first published article with `id`.
pub fn get_by_slug<'a>(articles: &'a [Article], id: &str) -> Option<&'a Article> {
    articles
        .iter()
        .find(|article| article.published && article.id == id)
}

/// Published articles immediately before and after `id` in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Adjacent {
    pub previous: Option<ArticleSummary>,
    pub next: Option<ArticleSummary>,
}

/// Computes neighbors of `id` among published articles.
///
/// Returns `None` when `id` is not a published article.
pub fn adjacent(articles: &[Article], id: &str) -> Option<Adjacent> {
    let visible = articles
        .iter()
        .filter(|article| article.published)
        .collect::<Vec<_>>();
    let position = visible.iter().position(|article| article.id == id)?;

    Some(Adjacent {
        previous: position
            .checked_sub(1)
            .and_then(|index| visible.get(index))
            .map(|article| article.summary()),
        next: visible.get(position + 1).map(|article| article.summary()),
    })
}

/// Related article link with its overlap score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedArticle {
    #[serde(flatten)]
    pub summary: ArticleSummary,
    pub score: usize,
}

/// Everything a detail page needs besides the rendering itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDetail<'a> {
    pub article: &'a Article,
    #[serde(flatten)]
    pub adjacent: Adjacent,
    pub related: Vec<RelatedArticle>,
}

/// Looks up `id` and computes its neighbors and up to `related_limit`
/// related articles.
pub fn article_detail<'a>(
    articles: &'a [Article],
    id: &str,
    related_limit: usize,
) -> Option<ArticleDetail<'a>> {
    let article = get_by_slug(articles, id)?;
    let adjacent = adjacent(articles, id).unwrap_or_default();
    let related = related_articles(articles, article, related_limit)
        .into_iter()
        .map(|(candidate, score)| RelatedArticle {
            summary: candidate.summary(),
            score,
        })
        .collect();

    Some(ArticleDetail {
        article,
        adjacent,
        related,
    })
}

#[cfg(test)]
mod tests {
    use super::{adjacent, get_by_slug};
    use crate::model::article::Article;
    use chrono::NaiveDate;

    fn articles() -> Vec<Article> {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut hidden = Article::new("hidden", date);
        hidden.published = false;
        vec![
            Article::new("a", date),
            hidden,
            Article::new("b", date),
            Article::new("c", date),
        ]
    }

    #[test]
    fn get_by_slug_ignores_unpublished() {
        let articles = articles();
        assert_eq!(get_by_slug(&articles, "b").unwrap().id, "b");
        assert!(get_by_slug(&articles, "hidden").is_none());
        assert!(get_by_slug(&articles, "missing").is_none());
    }

    #[test]
    fn adjacent_skips_unpublished_and_handles_edges() {
        let articles = articles();

        let first = adjacent(&articles, "a").unwrap();
        assert!(first.previous.is_none());
        assert_eq!(first.next.unwrap().id, "b");

        let middle = adjacent(&articles, "b").unwrap();
        assert_eq!(middle.previous.unwrap().id, "a");
        assert_eq!(middle.next.unwrap().id, "c");

        let last = adjacent(&articles, "c").unwrap();
        assert!(last.next.is_none());

        assert!(adjacent(&articles, "hidden").is_none());
    }
}
