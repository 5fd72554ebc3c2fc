//! Ordered, de-duplicated article collection.
//!
//! # Invariants
//! - Insertion order is discovery order and is never rearranged.
//! - The first article inserted for an id wins; later ones are rejected.
//! - A source file is claimed by at most one article.

use crate::model::article::{Article, ArticleId};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct ArticleCollection {
    articles: Vec<Article>,
    positions: HashMap<ArticleId, usize>,
    sources: HashSet<PathBuf>,
}

impl ArticleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `article` unless its id is already present.
    ///
    /// Returns `false` when the article was discarded as a duplicate.
    pub fn insert(&mut self, article: Article) -> bool {
        if self.positions.contains_key(&article.id) {
            return false;
        }
        if let Some(source) = article.source_path.as_ref() {
            self.sources.insert(source.clone());
        }
        self.positions.insert(article.id.clone(), self.articles.len());
        self.articles.push(article);
        true
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Returns whether some article already owns `path` as its source.
    pub fn contains_source(&self, path: &Path) -> bool {
        self.sources.contains(path)
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        self.positions.get(id).map(|index| &self.articles[*index])
    }

    /// Attaches a body file to an existing, still body-less article.
    ///
    /// Returns the updated article, or `None` when the id is unknown or the
    /// article already has a source.
    pub fn attach_source(
        &mut self,
        id: &str,
        path: &Path,
        body: String,
    ) -> Option<&mut Article> {
        let index = *self.positions.get(id)?;
        let article = &mut self.articles[index];
        if article.source_path.is_some() {
            return None;
        }
        article.body = body;
        article.source_path = Some(path.to_path_buf());
        self.sources.insert(path.to_path_buf());
        Some(article)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn as_slice(&self) -> &[Article] {
        &self.articles
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.articles.iter().map(|article| article.id.as_str())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Article> {
        self.articles.iter_mut()
    }

    pub fn into_vec(self) -> Vec<Article> {
        self.articles
    }
}
