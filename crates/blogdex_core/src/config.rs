//! Content source configuration.
//!
//! # Responsibility
//! - Describe where articles live and how file extensions map to body formats.
//! - Carry query defaults (related-article count, search limit).
//!
//! # Invariants
//! - Extensions are stored lowercase without a leading dot.
//! - One extension maps to at most one body format.

use crate::model::article::BodyFormat;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default directory walked for article files.
pub const DEFAULT_CONTENT_ROOT: &str = "content/articles";
/// Default manifest location.
pub const DEFAULT_MANIFEST_PATH: &str = "content/metadata.json";
/// Default number of related articles in a detail view.
pub const DEFAULT_RELATED_LIMIT: usize = 3;
/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Configuration error for content sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `content_root` is an empty path.
    EmptyContentRoot,
    /// Neither markdown nor HTML extensions are configured.
    NoExtensions,
    /// The same extension is declared for both body formats.
    OverlappingExtension(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContentRoot => write!(f, "content root must not be empty"),
            Self::NoExtensions => write!(f, "at least one content extension is required"),
            Self::OverlappingExtension(ext) => {
                write!(f, "extension `{ext}` is declared as both markdown and html")
            }
        }
    }
}

impl Error for ConfigError {}

/// Where to load articles from and how to query them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Directory scanned recursively for article files.
    pub content_root: PathBuf,
    /// Optional manifest pre-declaring article metadata.
    pub manifest_path: Option<PathBuf>,
    /// Extensions treated as plain markdown bodies.
    pub markdown_extensions: BTreeSet<String>,
    /// Extensions treated as pre-rendered HTML bodies.
    pub html_extensions: BTreeSet<String>,
    /// Maximum related articles per detail view.
    pub related_limit: usize,
    /// Search result cap used when a request carries no usable limit.
    pub search_limit: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_ROOT).with_manifest(DEFAULT_MANIFEST_PATH)
    }
}

impl ContentConfig {
    /// Creates a config for `content_root` with default extensions and no manifest.
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            manifest_path: None,
            markdown_extensions: normalize_extensions(["md", "markdown"]),
            html_extensions: normalize_extensions(["html", "htm"]),
            related_limit: DEFAULT_RELATED_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_manifest(mut self, manifest_path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(manifest_path.into());
        self
    }

    pub fn without_manifest(mut self) -> Self {
        self.manifest_path = None;
        self
    }

    /// Replaces the markdown extension set. Leading dots are ignored.
    pub fn with_markdown_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.markdown_extensions = normalize_extensions(extensions);
        self
    }

    /// Replaces the HTML extension set. Leading dots are ignored.
    pub fn with_html_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.html_extensions = normalize_extensions(extensions);
        self
    }

    pub fn with_related_limit(mut self, limit: usize) -> Self {
        self.related_limit = limit;
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Validates config invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root.as_os_str().is_empty() {
            return Err(ConfigError::EmptyContentRoot);
        }
        if self.markdown_extensions.is_empty() && self.html_extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        if let Some(ext) = self
            .markdown_extensions
            .intersection(&self.html_extensions)
            .next()
        {
            return Err(ConfigError::OverlappingExtension(ext.clone()));
        }
        Ok(())
    }

    /// Maps a file path to its body format by extension.
    ///
    /// Returns `None` for files that are not content.
    pub fn format_for_path(&self, path: &Path) -> Option<BodyFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if self.markdown_extensions.contains(&ext) {
            Some(BodyFormat::Markdown)
        } else if self.html_extensions.contains(&ext) {
            Some(BodyFormat::Html)
        } else {
            None
        }
    }
}

fn normalize_extensions<I, S>(extensions: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}
