//! Keyword/tag filtering with newest-first ordering.
//!
//! # Invariants
//! - Only published articles are returned.
//! - Equal dates keep store order (stable sort).

use crate::model::article::Article;

/// Filters and sorts articles for listing and search.
///
/// Rules:
/// - `query`, when non-empty, must occur case-insensitively in the title or
///   the description.
/// - `tag`, when non-empty, must occur case-insensitively anywhere in the
///   serialized tag list, so `"go"` also matches `["Golang"]`.
/// - Results are ordered by `created_at` descending.
pub fn filter_articles<'a>(articles: &'a [Article], query: &str, tag: &str) -> Vec<&'a Article> {
    let query = query.to_lowercase();
    let tag = tag.to_lowercase();

    let mut matched = articles
        .iter()
        .filter(|article| article.published)
        .filter(|article| query.is_empty() || matches_query(article, &query))
        .filter(|article| tag.is_empty() || matches_tag(article, &tag))
        .collect::<Vec<_>>();

    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched
}

fn matches_query(article: &Article, lowered_query: &str) -> bool {
    article.title.to_lowercase().contains(lowered_query)
        || article.description.to_lowercase().contains(lowered_query)
}

fn matches_tag(article: &Article, lowered_tag: &str) -> bool {
    article
        .serialized_tags()
        .to_lowercase()
        .contains(lowered_tag)
}

#[cfg(test)]
mod tests {
    use super::filter_articles;
    use crate::model::article::Article;
    use chrono::NaiveDate;

    fn article(id: &str, day: u32, title: &str) -> Article {
        let mut article = Article::new(id, NaiveDate::from_ymd_opt(2025, 3, day).unwrap());
        article.title = title.to_string();
        article
    }

    #[test]
    fn equal_dates_keep_store_order() {
        let articles = vec![
            article("first", 1, "a"),
            article("second", 1, "b"),
            article("newer", 2, "c"),
            article("third", 1, "d"),
        ];
        let ids = filter_articles(&articles, "", "")
            .iter()
            .map(|a| a.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["newer", "first", "second", "third"]);
    }

    #[test]
    fn description_match_counts_as_query_hit() {
        let mut target = article("a", 1, "unrelated");
        target.description = "Rustの所有権".to_string();
        let articles = vec![target, article("b", 2, "other")];
        let hits = filter_articles(&articles, "rust", "");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }
}
