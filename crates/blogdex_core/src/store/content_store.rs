//! Load-once content store.
//!
//! # Responsibility
//! - Hold the article snapshot every query reads from.
//! - Run ingestion lazily on first access, exactly once per process.
//!
//! # Invariants
//! - Readers observe either a fully populated snapshot or none at all.
//! - Concurrent first accesses run a single ingestion; the others wait.
//! - An ingestion that finds nothing is not cached, so the next access
//!   scans again.

use crate::config::ContentConfig;
use crate::model::article::Article;
use crate::store::ingest::Ingestor;
use crate::store::ArticleRepository;
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Marker returned when an ingestion pass yielded no articles.
struct EmptyScan;

pub struct ContentStore {
    ingestor: Option<Ingestor>,
    snapshot: OnceCell<Vec<Article>>,
    passes: AtomicUsize,
}

impl ContentStore {
    /// Creates a lazily loading store for `config`.
    pub fn new(config: ContentConfig) -> Self {
        Self::with_ingestor(Ingestor::new(config))
    }

    /// Creates a lazily loading store around a prepared ingestor.
    pub fn with_ingestor(ingestor: Ingestor) -> Self {
        Self {
            ingestor: Some(ingestor),
            snapshot: OnceCell::new(),
            passes: AtomicUsize::new(0),
        }
    }

    /// Creates an already populated store; no ingestion ever runs.
    pub fn from_articles(articles: Vec<Article>) -> Self {
        Self {
            ingestor: None,
            snapshot: OnceCell::with_value(articles),
            passes: AtomicUsize::new(0),
        }
    }

    /// Returns whether a snapshot has been published.
    pub fn is_loaded(&self) -> bool {
        self.snapshot.get().is_some()
    }

    /// Number of ingestion passes run so far, empty ones included.
    pub fn ingestion_passes(&self) -> usize {
        self.passes.load(Ordering::Acquire)
    }

    /// Forces the one-shot load and returns the snapshot size.
    pub fn ensure_loaded(&self) -> usize {
        self.snapshot().len()
    }

    fn snapshot(&self) -> &[Article] {
        match self.snapshot.get_or_try_init(|| self.load()) {
            Ok(articles) => articles.as_slice(),
            Err(EmptyScan) => &[],
        }
    }

    fn load(&self) -> Result<Vec<Article>, EmptyScan> {
        let Some(ingestor) = self.ingestor.as_ref() else {
            return Err(EmptyScan);
        };
        let pass = self.passes.fetch_add(1, Ordering::AcqRel) + 1;
        let (collection, report) = ingestor.ingest();
        if collection.is_empty() {
            warn!(
                "event=store_init module=store status=empty pass={pass} root={}",
                ingestor.config().content_root.display()
            );
            return Err(EmptyScan);
        }

        info!(
            "event=store_init module=store status=ok pass={pass} articles={} inserted={}",
            collection.len(),
            report.inserted()
        );
        Ok(collection.into_vec())
    }
}

impl ArticleRepository for ContentStore {
    fn articles(&self) -> &[Article] {
        self.snapshot()
    }
}
