//! Detail endpoint adapter with format selection by path suffix.
//!
//! # Invariants
//! - `.md`, `.json` and bare paths share one lookup and differ only in
//!   output encoding.

use crate::model::article::ArticleJson;
use crate::query::ArticleDetail;
use crate::service::article_service::{ArticleService, ArticleServiceError};
use crate::store::ArticleRepository;

const MARKDOWN_SUFFIX: &str = ".md";
const JSON_SUFFIX: &str = ".json";

/// Output encoding selected by the path segment suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFormat {
    Html,
    Markdown,
    Json,
}

impl DetailFormat {
    /// Splits `slug.md` / `slug.json` / `slug` into id and format.
    pub fn split(segment: &str) -> (&str, Self) {
        if let Some(id) = segment.strip_suffix(MARKDOWN_SUFFIX) {
            (id, Self::Markdown)
        } else if let Some(id) = segment.strip_suffix(JSON_SUFFIX) {
            (id, Self::Json)
        } else {
            (segment, Self::Html)
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::Markdown => "text/markdown; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

/// Detail payload per format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView<'a> {
    /// Template input: article plus neighbors and related links.
    Html(ArticleDetail<'a>),
    /// Ready-to-serve markdown document.
    Markdown(String),
    /// Minimal `{title, slug, description}` projection.
    Json(ArticleJson<'a>),
}

impl DetailView<'_> {
    pub fn format(&self) -> DetailFormat {
        match self {
            Self::Html(_) => DetailFormat::Html,
            Self::Markdown(_) => DetailFormat::Markdown,
            Self::Json(_) => DetailFormat::Json,
        }
    }
}

/// Resolves a detail path segment into its view.
///
/// # Errors
/// - [`ArticleServiceError::NotFound`] when no published article matches.
pub fn render_detail<'a, R: ArticleRepository>(
    service: &'a ArticleService<R>,
    segment: &str,
) -> Result<DetailView<'a>, ArticleServiceError> {
    let (id, format) = DetailFormat::split(segment);
    match format {
        DetailFormat::Html => service.get_detail(id).map(DetailView::Html),
        DetailFormat::Markdown => service
            .get_article(id)
            .map(|article| DetailView::Markdown(article.to_markdown())),
        DetailFormat::Json => service
            .get_article(id)
            .map(|article| DetailView::Json(article.json_projection())),
    }
}

#[cfg(test)]
mod tests {
    use super::DetailFormat;

    #[test]
    fn split_recognizes_format_suffixes() {
        assert_eq!(DetailFormat::split("go-history.md"), ("go-history", DetailFormat::Markdown));
        assert_eq!(DetailFormat::split("go-history.json"), ("go-history", DetailFormat::Json));
        assert_eq!(DetailFormat::split("go-history"), ("go-history", DetailFormat::Html));
        assert_eq!(DetailFormat::split("v1.2"), ("v1.2", DetailFormat::Html));
    }

    #[test]
    fn content_types_match_format() {
        assert_eq!(DetailFormat::Json.content_type(), "application/json");
        assert!(DetailFormat::Markdown.content_type().starts_with("text/markdown"));
    }
}
