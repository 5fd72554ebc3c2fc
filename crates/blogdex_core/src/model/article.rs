//! Article domain model.
//!
//! # Responsibility
//! - Define the canonical record served by listing, detail and search views.
//! - Provide read-only projections so callers never deep-copy full bodies.
//!
//! # Invariants
//! - `id` is unique inside one content store.
//! - `tags` keeps declaration order; the serialized list form is what tag
//!   filtering matches against.
//! - Unpublished articles stay resident but are never returned by queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Public lookup key (slug) of an article.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ArticleId = String;

/// Display format used by the markdown projection for `created_at`.
const MARKDOWN_DATE_FORMAT: &str = "%Y年%m月%d日";

/// Body encoding of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
    /// Plain markdown body; eligible for metadata heuristics.
    Markdown,
    /// Pre-rendered HTML body; served as-is and never inspected.
    Html,
}

impl BodyFormat {
    /// Returns whether metadata may be derived from this body kind.
    pub fn is_plain_body(self) -> bool {
        matches!(self, Self::Markdown)
    }
}

/// Canonical content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Stable slug. Serialized as `slug` to match the public URL naming.
    #[serde(rename = "slug")]
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    /// Emoji glyph, URL or site-relative path.
    pub icon: String,
    pub tags: Vec<String>,
    /// Raw body text. Empty until a manifest entry gets its file attached.
    #[serde(rename = "content")]
    pub body: String,
    #[serde(rename = "content_type")]
    pub format: BodyFormat,
    /// Drives every ordering in the query engine.
    #[serde(rename = "created_date")]
    pub created_at: NaiveDate,
    pub published: bool,
    /// Origin file; `None` for manifest entries whose file was never found.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_path: Option<PathBuf>,
}

impl Article {
    /// Creates a published markdown article with empty metadata.
    pub fn new(id: impl Into<ArticleId>, created_at: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            icon: String::new(),
            tags: Vec::new(),
            body: String::new(),
            format: BodyFormat::Markdown,
            created_at,
            published: true,
            source_path: None,
        }
    }

    /// Returns the tag list in its serialized JSON form, e.g. `["Go","歴史"]`.
    pub fn serialized_tags(&self) -> String {
        serde_json::to_string(&self.tags).unwrap_or_else(|_| "[]".to_string())
    }

    /// Returns whether `icon` points at an image instead of being a glyph.
    pub fn is_icon_url(&self) -> bool {
        self.icon.starts_with("http") || self.icon.starts_with("./") || self.icon.starts_with('/')
    }

    /// Returns whether a body has been attached to this article.
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Reduces this article to the fields needed by neighbor/related links.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            created_at: self.created_at,
        }
    }

    /// Builds the minimal JSON projection served for `<slug>.json`.
    pub fn json_projection(&self) -> ArticleJson<'_> {
        ArticleJson {
            title: &self.title,
            slug: &self.id,
            description: &self.description,
        }
    }

    /// Renders the markdown representation served for `<slug>.md`.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);
        if !self.description.is_empty() {
            out.push_str(&self.description);
            out.push_str("\n\n");
        }
        out.push_str(&format!(
            "**作成日:** {}\n\n",
            self.created_at.format(MARKDOWN_DATE_FORMAT)
        ));
        if !self.tags.is_empty() {
            out.push_str(&format!("**タグ:** {}\n\n", self.serialized_tags()));
        }
        out.push_str("---\n\n");
        out.push_str(&self.body);
        out
    }
}

/// Lightweight article reference used for adjacent and related links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    #[serde(rename = "slug")]
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(rename = "created_date")]
    pub created_at: NaiveDate,
}

/// Minimal JSON projection: title, slug and description only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArticleJson<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
}

#[cfg(test)]
mod tests {
    use super::{Article, BodyFormat};
    use chrono::NaiveDate;

    fn sample() -> Article {
        let date = NaiveDate::from_ymd_opt(2025, 8, 26).unwrap();
        let mut article = Article::new("2025-08-26-go-history", date);
        article.title = "Goの歴史".to_string();
        article.description = "Go言語の歩み".to_string();
        article.tags = vec!["Go".to_string(), "歴史".to_string()];
        article.body = "本文".to_string();
        article
    }

    #[test]
    fn serialized_tags_uses_json_list_form() {
        assert_eq!(sample().serialized_tags(), r#"["Go","歴史"]"#);
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(Article::new("empty", date).serialized_tags(), "[]");
    }

    #[test]
    fn icon_url_detection_covers_remote_and_local_paths() {
        let mut article = sample();
        article.icon = "🐹".to_string();
        assert!(!article.is_icon_url());
        for icon in ["https://example.com/a.png", "./icons/a.svg", "/images/a.svg"] {
            article.icon = icon.to_string();
            assert!(article.is_icon_url(), "{icon} should be treated as a URL");
        }
    }

    #[test]
    fn markdown_projection_lists_metadata_before_body() {
        let markdown = sample().to_markdown();
        assert!(markdown.starts_with("# Goの歴史\n\nGo言語の歩み\n\n"));
        assert!(markdown.contains("**作成日:** 2025年08月26日"));
        assert!(markdown.contains(r#"**タグ:** ["Go","歴史"]"#));
        assert!(markdown.ends_with("---\n\n本文"));
    }

    #[test]
    fn serialization_uses_public_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["slug"], "2025-08-26-go-history");
        assert_eq!(json["content_type"], "markdown");
        assert_eq!(json["created_date"], "2025-08-26");
        assert!(json.get("source_path").is_none());
        assert!(BodyFormat::Markdown.is_plain_body());
        assert!(!BodyFormat::Html.is_plain_body());
    }
}
