//! Stateless query engine over an article snapshot.
//!
//! # Responsibility
//! - Listing filters, single-item lookup, neighbors and relatedness.
//!
//! # Invariants
//! - Every function ignores unpublished articles.
//! - Functions never mutate or reorder the snapshot they read.

pub mod filter;
pub mod lookup;
pub mod related;

pub use filter::filter_articles;
pub use lookup::{adjacent, article_detail, get_by_slug, Adjacent, ArticleDetail, RelatedArticle};
pub use related::{overlap_score, related_articles, tokenize};
