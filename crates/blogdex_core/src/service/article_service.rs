//! Article use-case service.
//!
//! # Responsibility
//! - Provide listing, lookup, detail and search APIs over a repository.
//! - Turn absent lookups into a caller-visible not-found error.
//!
//! # Invariants
//! - Listing and search are sorted by `created_at DESC`, store order on ties.
//! - Search truncates to the requested limit after sorting.

use crate::config::DEFAULT_RELATED_LIMIT;
use crate::model::article::Article;
use crate::query::{article_detail, filter_articles, get_by_slug, ArticleDetail};
use crate::store::ArticleRepository;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for article use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleServiceError {
    /// No published article has this id.
    NotFound(String),
}

impl Display for ArticleServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "article not found: {id}"),
        }
    }
}

impl Error for ArticleServiceError {}

/// Article service facade over repository implementations.
pub struct ArticleService<R: ArticleRepository> {
    repo: R,
    related_limit: usize,
}

impl<R: ArticleRepository> ArticleService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }

    /// Overrides how many related articles a detail view carries.
    pub fn with_related_limit(mut self, related_limit: usize) -> Self {
        self.related_limit = related_limit;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists published articles matching `query` and `tag`, newest first.
    pub fn list_articles(&self, query: &str, tag: &str) -> Vec<&Article> {
        filter_articles(self.repo.articles(), query, tag)
    }

    /// Gets one published article by id.
    pub fn get_article(&self, id: &str) -> Result<&Article, ArticleServiceError> {
        get_by_slug(self.repo.articles(), id).ok_or_else(|| not_found(id))
    }

    /// Gets one published article with neighbors and related articles.
    pub fn get_detail(&self, id: &str) -> Result<ArticleDetail<'_>, ArticleServiceError> {
        article_detail(self.repo.articles(), id, self.related_limit).ok_or_else(|| not_found(id))
    }

    /// Returns at most `limit` published articles matching `query`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Article> {
        let mut hits = filter_articles(self.repo.articles(), query, "");
        hits.truncate(limit);
        hits
    }
}

fn not_found(id: &str) -> ArticleServiceError {
    debug!("event=article_lookup module=service status=not_found id={id}");
    ArticleServiceError::NotFound(id.to_string())
}
