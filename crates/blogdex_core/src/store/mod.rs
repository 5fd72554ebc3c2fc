//! Content store: ingestion and the in-memory article snapshot.
//!
//! # Responsibility
//! - Merge the manifest and the content directory into one ordered collection.
//! - Expose the collection through a read-only repository contract.
//!
//! # Invariants
//! - Article ids are unique; the earliest discovered article wins.
//! - The snapshot is immutable once published to readers.

pub mod collection;
pub mod content_store;
pub mod ingest;
pub mod manifest;

use crate::model::article::Article;

/// Read-only access to an ordered article snapshot.
///
/// Order is store order (discovery order), which adjacent-article lookup
/// relies on.
pub trait ArticleRepository {
    fn articles(&self) -> &[Article];
}

impl ArticleRepository for collection::ArticleCollection {
    fn articles(&self) -> &[Article] {
        self.as_slice()
    }
}

impl ArticleRepository for Vec<Article> {
    fn articles(&self) -> &[Article] {
        self.as_slice()
    }
}

impl<R: ArticleRepository + ?Sized> ArticleRepository for &R {
    fn articles(&self) -> &[Article] {
        (**self).articles()
    }
}
