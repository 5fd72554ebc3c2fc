//! Keyword-overlap relatedness.
//!
//! # Invariants
//! - Tokens are lowercase alphanumeric runs (CJK included) of 2+ chars.
//! - Scores count matching token pairs with multiplicity.
//! - Zero-score candidates are never returned.

use crate::model::article::Article;
use once_cell::sync::Lazy;
use regex::Regex;

const MIN_TOKEN_CHARS: usize = 2;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("valid token regex"));

/// Splits text into lowercase tokens, keeping letter/digit runs together.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .collect()
}

/// Tokens of `title + " " + description`.
pub fn article_tokens(article: &Article) -> Vec<String> {
    tokenize(&format!("{} {}", article.title, article.description))
}

/// Counts pairs `(a, b)` with `a == b`, repeated tokens included.
pub fn overlap_score(left: &[String], right: &[String]) -> usize {
    left.iter()
        .map(|a| right.iter().filter(|b| *b == a).count())
        .sum()
}

/// Ranks other published articles by overlap with `target`.
///
/// Returns at most `limit` `(article, score)` pairs, best first; equal
/// scores keep store order.
pub fn related_articles<'a>(
    articles: &'a [Article],
    target: &Article,
    limit: usize,
) -> Vec<(&'a Article, usize)> {
    let target_tokens = article_tokens(target);
    let mut scored = articles
        .iter()
        .filter(|candidate| candidate.published && candidate.id != target.id)
        .map(|candidate| {
            let score = overlap_score(&target_tokens, &article_tokens(candidate));
            (candidate, score)
        })
        .filter(|(_, score)| *score > 0)
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::{overlap_score, tokenize};

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn tokenize_keeps_cjk_runs_and_drops_single_chars() {
        assert_eq!(
            tokenize("Go言語 と Docker, a K8s!"),
            vec!["go言語".to_string(), "docker".to_string(), "k8s".to_string()]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("a b c ・").is_empty());
    }

    #[test]
    fn overlap_score_counts_multiplicity() {
        assert_eq!(
            overlap_score(&tokens(&["go", "history", "google"]), &tokens(&["go", "history"])),
            2
        );
        assert_eq!(
            overlap_score(&tokens(&["go", "go"]), &tokens(&["go", "docker"])),
            2
        );
        assert_eq!(
            overlap_score(&tokens(&["go", "go"]), &tokens(&["go", "go"])),
            4
        );
        assert_eq!(overlap_score(&tokens(&["go"]), &tokens(&["rust"])), 0);
    }
}
