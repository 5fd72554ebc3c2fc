//! Core library for blogdex, a file-backed article index.
//!
//! Ingests markdown/HTML files plus an optional JSON manifest into an
//! immutable snapshot and answers listing, detail and search queries over it.

pub mod api;
pub mod config;
pub mod extract;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use api::detail::{render_detail, DetailFormat, DetailView};
pub use api::listing::{list, ListingPage, ListingParams};
pub use api::search::{search, SearchParams, SearchResponse};
pub use config::{ConfigError, ContentConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError, LoggingStatus};
pub use model::article::{Article, ArticleId, ArticleJson, ArticleSummary, BodyFormat};
pub use query::{Adjacent, ArticleDetail, RelatedArticle};
pub use service::article_service::{ArticleService, ArticleServiceError};
pub use store::collection::ArticleCollection;
pub use store::content_store::ContentStore;
pub use store::ingest::{IngestError, IngestReport, Ingestor};
pub use store::ArticleRepository;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
