//! Search endpoint adapter.
//!
//! # Invariants
//! - `total` is the number of posts returned after truncation, not the
//!   number of matches before it.
//! - A missing, empty, negative or non-numeric `limit` means the default.

use crate::api::query_value;
use crate::config::DEFAULT_SEARCH_LIMIT;
use crate::model::article::Article;
use crate::service::article_service::ArticleService;
use crate::store::ArticleRepository;
use serde::Serialize;

/// Parsed `q` / `limit` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub limit: usize,
}

impl SearchParams {
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
        }
    }

    /// Parses a raw query string using the default limit of 10.
    pub fn from_query(raw: &str) -> Self {
        Self::from_query_with_default(raw, DEFAULT_SEARCH_LIMIT)
    }

    /// Parses a raw query string, falling back to `default_limit`.
    pub fn from_query_with_default(raw: &str, default_limit: usize) -> Self {
        Self {
            query: query_value(raw, "q").unwrap_or_default(),
            limit: parse_limit(query_value(raw, "limit").as_deref(), default_limit),
        }
    }
}

/// Parses a raw `limit` value; anything but a non-negative integer yields
/// `default_limit`.
pub fn parse_limit(raw: Option<&str>, default_limit: usize) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(default_limit)
}

/// JSON payload `{posts, total, query}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResponse<'a> {
    pub posts: Vec<&'a Article>,
    pub total: usize,
    pub query: String,
}

impl SearchResponse<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Runs a bounded search and wraps the result.
pub fn search<'a, R: ArticleRepository>(
    service: &'a ArticleService<R>,
    params: &SearchParams,
) -> SearchResponse<'a> {
    let posts = service.search(&params.query, params.limit);
    SearchResponse {
        total: posts.len(),
        posts,
        query: params.query.clone(),
    }
}
