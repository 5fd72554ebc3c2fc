//! Article manifest parsing and per-entry validation.
//!
//! # Responsibility
//! - Decode the JSON manifest that pre-declares article metadata.
//! - Reject malformed entries one by one instead of failing the document.
//!
//! # Invariants
//! - Both a top-level array and a `{"files": [...]}` wrapper are accepted.
//! - A rejected entry never prevents later entries from loading.

use crate::extract::metadata::derive_icon;
use crate::model::article::Article;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const MANIFEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Document-level manifest failure. The whole manifest is skipped.
#[derive(Debug)]
pub enum ManifestError {
    /// Content is not valid JSON.
    Json(serde_json::Error),
    /// JSON is valid but neither an array nor a `files` wrapper.
    UnexpectedShape,
}

impl Display for ManifestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid manifest json: {err}"),
            Self::UnexpectedShape => {
                write!(f, "manifest must be an array or an object with a `files` array")
            }
        }
    }
}

impl Error for ManifestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::UnexpectedShape => None,
        }
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Entry-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntryError {
    /// Entry cannot be decoded into the expected field types.
    Malformed(String),
    EmptyId,
    /// Id contains whitespace or path separators and cannot be a URL segment.
    InvalidId(String),
}

impl Display for ManifestEntryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed manifest entry: {message}"),
            Self::EmptyId => write!(f, "manifest entry id must not be empty"),
            Self::InvalidId(value) => write!(f, "manifest entry id is invalid: `{value}`"),
        }
    }
}

impl Error for ManifestEntryError {}

/// One declared article.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    /// Declared body file, matched against scanned files by basename.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `YYYY-MM-DD`; anything else falls back to the ingestion date.
    #[serde(default)]
    pub created: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl ManifestEntry {
    /// Validates declaration-level invariants.
    pub fn validate(&self) -> Result<(), ManifestEntryError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ManifestEntryError::EmptyId);
        }
        if id
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '\\')
        {
            return Err(ManifestEntryError::InvalidId(self.id.clone()));
        }
        Ok(())
    }

    /// Parses `created`, returning `None` when absent or malformed.
    pub fn created_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.created.trim(), MANIFEST_DATE_FORMAT).ok()
    }

    /// Basename of the declared body file, if any.
    pub fn declared_file_name(&self) -> Option<&str> {
        let trimmed = self.path.trim();
        if trimmed.is_empty() {
            return None;
        }
        Path::new(trimmed).file_name()?.to_str()
    }

    /// Converts this entry into a body-less article.
    ///
    /// A missing icon is derived from the title; other missing fields are
    /// filled once a body is attached. The body format is settled by the
    /// attached file's extension.
    pub fn into_article(self, fallback_date: NaiveDate) -> Article {
        let created_at = self.created_date().unwrap_or(fallback_date);
        let icon = if self.icon.trim().is_empty() && !self.title.trim().is_empty() {
            derive_icon(&self.title)
        } else {
            self.icon
        };

        let mut article = Article::new(self.id.trim(), created_at);
        article.title = self.title;
        article.description = self.description;
        article.icon = icon;
        article.tags = self.tags;
        article.published = self.published;
        article
    }
}

/// Decoded manifest: accepted entries plus rejected entry positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDocument {
    /// Valid entries in declaration order.
    pub entries: Vec<ManifestEntry>,
    /// `(position, error)` for every rejected entry.
    pub rejected: Vec<(usize, ManifestEntryError)>,
}

/// Parses a manifest document.
///
/// # Errors
/// - Returns [`ManifestError`] only when the document itself is unusable;
///   bad entries are reported in [`ManifestDocument::rejected`].
pub fn parse_manifest(raw: &str) -> Result<ManifestDocument, ManifestError> {
    let value: Value = serde_json::from_str(raw)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("files") {
            Some(Value::Array(items)) => items,
            _ => return Err(ManifestError::UnexpectedShape),
        },
        _ => return Err(ManifestError::UnexpectedShape),
    };

    let mut document = ManifestDocument::default();
    for (position, item) in items.into_iter().enumerate() {
        let decoded = serde_json::from_value::<ManifestEntry>(item)
            .map_err(|err| ManifestEntryError::Malformed(err.to_string()))
            .and_then(|entry| entry.validate().map(|()| entry));
        match decoded {
            Ok(entry) => document.entries.push(entry),
            Err(err) => document.rejected.push((position, err)),
        }
    }
    Ok(document)
}
