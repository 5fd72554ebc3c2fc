//! Content ingestion: manifest merge followed by a recursive directory scan.
//!
//! # Responsibility
//! - Turn a manifest plus a content directory into an [`ArticleCollection`].
//! - Derive missing metadata for plain-body files only.
//!
//! # Invariants
//! - Manifest entries are merged before any scanned file (first writer wins).
//! - A failing item is logged and skipped; ingestion itself never fails.
//! - Running ingestion again into the same collection adds nothing.
//! - Walk order is sorted by file name, so discovery order is reproducible.

use crate::config::ContentConfig;
use crate::extract::metadata::{
    derive_description, derive_icon, derive_title, DEFAULT_ICON, GENERIC_DESCRIPTION, UNTITLED,
};
use crate::model::article::{Article, ArticleId, BodyFormat};
use crate::store::collection::ArticleCollection;
use crate::store::manifest::{parse_manifest, ManifestEntryError, ManifestError};
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DATE_PREFIX_FORMAT: &str = "%Y-%m-%d";
const DATE_PREFIX_LEN: usize = 10;

const HTML_TITLE_PREFIX: &str = "HTML記事: ";
const HTML_DESCRIPTION: &str = "HTMLで作成された記事";
const HTML_TAGS: &[&str] = &["HTML", "ブログ"];
const HTML_ICON: &str = "📄";
const MARKDOWN_TAGS: &[&str] = &["Markdown", "ブログ"];

/// Item-scoped ingestion failure. Logged, never propagated.
#[derive(Debug)]
pub enum IngestError {
    /// A content or manifest file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The manifest document is unusable as a whole.
    Manifest {
        path: PathBuf,
        source: ManifestError,
    },
    /// One manifest entry was rejected.
    InvalidEntry {
        position: usize,
        source: ManifestEntryError,
    },
    /// A file name is not valid UTF-8 and cannot become an identifier.
    InvalidFileName(PathBuf),
    /// The directory walk failed on one entry.
    Walk(walkdir::Error),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read `{}`: {source}", path.display()),
            Self::Manifest { path, source } => {
                write!(f, "failed to load manifest `{}`: {source}", path.display())
            }
            Self::InvalidEntry { position, source } => {
                write!(f, "manifest entry #{position} rejected: {source}")
            }
            Self::InvalidFileName(path) => {
                write!(f, "file name is not valid UTF-8: `{}`", path.display())
            }
            Self::Walk(err) => write!(f, "directory walk failed: {err}"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Manifest { source, .. } => Some(source),
            Self::InvalidEntry { source, .. } => Some(source),
            Self::InvalidFileName(_) => None,
            Self::Walk(err) => Some(err),
        }
    }
}

impl From<walkdir::Error> for IngestError {
    fn from(value: walkdir::Error) -> Self {
        Self::Walk(value)
    }
}

/// Counters for one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Manifest entries inserted as new articles.
    pub manifest_entries: usize,
    /// Scanned files attached as bodies of manifest entries.
    pub attached: usize,
    /// Scanned files inserted as new articles.
    pub scanned: usize,
    /// Items discarded because their id already existed.
    pub duplicates: usize,
    /// Items skipped because of an [`IngestError`].
    pub skipped: usize,
}

impl IngestReport {
    /// Number of articles this pass added to the collection.
    pub fn inserted(&self) -> usize {
        self.manifest_entries + self.scanned
    }
}

enum FileOutcome {
    Attached,
    Inserted,
    Duplicate,
    AlreadyClaimed,
}

/// Builds article collections from a [`ContentConfig`].
#[derive(Debug, Clone)]
pub struct Ingestor {
    config: ContentConfig,
    today: NaiveDate,
}

impl Ingestor {
    /// Creates an ingestor whose fallback date is the current local date.
    pub fn new(config: ContentConfig) -> Self {
        Self::with_today(config, chrono::Local::now().date_naive())
    }

    /// Creates an ingestor with an explicit fallback date.
    pub fn with_today(config: ContentConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Date assigned to articles without a parseable date.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Runs one ingestion pass into a fresh collection.
    pub fn ingest(&self) -> (ArticleCollection, IngestReport) {
        let mut collection = ArticleCollection::new();
        let report = self.ingest_into(&mut collection);
        (collection, report)
    }

    /// Runs one ingestion pass into `collection`.
    ///
    /// Safe to repeat: ids and source files already present are skipped.
    pub fn ingest_into(&self, collection: &mut ArticleCollection) -> IngestReport {
        let mut report = IngestReport::default();
        let declared = self.merge_manifest(collection, &mut report);
        self.scan_content_root(collection, &declared, &mut report);
        fill_placeholders(collection);

        info!(
            "event=content_scan module=store status=ok root={} manifest_entries={} attached={} scanned={} duplicates={} skipped={} total={}",
            self.config.content_root.display(),
            report.manifest_entries,
            report.attached,
            report.scanned,
            report.duplicates,
            report.skipped,
            collection.len()
        );
        report
    }

    /// Inserts manifest entries and returns `declared file name -> id`.
    fn merge_manifest(
        &self,
        collection: &mut ArticleCollection,
        report: &mut IngestReport,
    ) -> HashMap<String, ArticleId> {
        let mut declared = HashMap::new();
        let Some(path) = self.config.manifest_path.as_deref() else {
            return declared;
        };
        if !path.is_file() {
            info!(
                "event=manifest_load module=store status=skip reason=missing path={}",
                path.display()
            );
            return declared;
        }

        let document = match fs::read_to_string(path)
            .map_err(|source| IngestError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|raw| {
                parse_manifest(&raw).map_err(|source| IngestError::Manifest {
                    path: path.to_path_buf(),
                    source,
                })
            }) {
            Ok(document) => document,
            Err(err) => {
                log_skipped(&err);
                report.skipped += 1;
                return declared;
            }
        };

        for (position, source) in document.rejected {
            log_skipped(&IngestError::InvalidEntry { position, source });
            report.skipped += 1;
        }

        for entry in document.entries {
            let id = entry.id.trim().to_string();
            let file_name = entry.declared_file_name().map(str::to_string);
            if collection.insert(entry.into_article(self.today)) {
                report.manifest_entries += 1;
                if let Some(name) = file_name {
                    declared.entry(name).or_insert(id);
                }
            } else {
                debug!("event=manifest_entry module=store status=duplicate id={id}");
                report.duplicates += 1;
            }
        }
        declared
    }

    fn scan_content_root(
        &self,
        collection: &mut ArticleCollection,
        declared: &HashMap<String, ArticleId>,
        report: &mut IngestReport,
    ) {
        let root = self.config.content_root.as_path();
        if !root.is_dir() {
            info!(
                "event=content_walk module=store status=skip reason=missing root={}",
                root.display()
            );
            return;
        }

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log_skipped(&IngestError::from(err));
                    report.skipped += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let Some(format) = self.config.format_for_path(path) else {
                continue;
            };

            match self.ingest_file(collection, declared, path, format) {
                Ok(FileOutcome::Attached) => report.attached += 1,
                Ok(FileOutcome::Inserted) => report.scanned += 1,
                Ok(FileOutcome::Duplicate) => {
                    debug!(
                        "event=content_file module=store status=duplicate path={}",
                        path.display()
                    );
                    report.duplicates += 1;
                }
                Ok(FileOutcome::AlreadyClaimed) => {}
                Err(err) => {
                    log_skipped(&err);
                    report.skipped += 1;
                }
            }
        }
    }

    fn ingest_file(
        &self,
        collection: &mut ArticleCollection,
        declared: &HashMap<String, ArticleId>,
        path: &Path,
        format: BodyFormat,
    ) -> Result<FileOutcome, IngestError> {
        if collection.contains_source(path) {
            return Ok(FileOutcome::AlreadyClaimed);
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| IngestError::InvalidFileName(path.to_path_buf()))?;
        let id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| IngestError::InvalidFileName(path.to_path_buf()))?;

        let attach_target = declared
            .get(file_name)
            .filter(|declared_id| {
                collection
                    .get(declared_id)
                    .is_some_and(|article| article.source_path.is_none())
            })
            .cloned();
        if attach_target.is_none() && collection.contains_id(id) {
            return Ok(FileOutcome::Duplicate);
        }

        let body = read_body(path)?;
        if let Some(declared_id) = attach_target {
            return Ok(match collection.attach_source(&declared_id, path, body) {
                Some(article) => {
                    article.format = format;
                    if format.is_plain_body() {
                        fill_from_body(article);
                    }
                    FileOutcome::Attached
                }
                None => FileOutcome::Duplicate,
            });
        }

        let article = self.article_from_file(id, path, body, format);
        if collection.insert(article) {
            Ok(FileOutcome::Inserted)
        } else {
            Ok(FileOutcome::Duplicate)
        }
    }

    fn article_from_file(
        &self,
        id: &str,
        path: &Path,
        body: String,
        format: BodyFormat,
    ) -> Article {
        let created_at = date_prefix(id).unwrap_or(self.today);
        let mut article = Article::new(id, created_at);
        article.format = format;
        article.body = body;
        article.source_path = Some(path.to_path_buf());

        match format {
            BodyFormat::Markdown => {
                article.tags = to_tags(MARKDOWN_TAGS);
                fill_from_body(&mut article);
            }
            BodyFormat::Html => {
                article.title = format!("{HTML_TITLE_PREFIX}{id}");
                article.description = HTML_DESCRIPTION.to_string();
                article.tags = to_tags(HTML_TAGS);
                article.icon = HTML_ICON.to_string();
            }
        }
        article
    }
}

/// Extracts a `YYYY-MM-DD` prefix from a file stem.
///
/// The prefix is only read; identifiers keep it.
pub fn date_prefix(stem: &str) -> Option<NaiveDate> {
    let prefix = stem.get(..DATE_PREFIX_LEN)?;
    let bytes = prefix.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(prefix, DATE_PREFIX_FORMAT).ok()
}

fn read_body(path: &Path) -> Result<String, IngestError> {
    fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Fills absent metadata from a plain markdown body.
fn fill_from_body(article: &mut Article) {
    if article.title.trim().is_empty() {
        article.title = derive_title(&article.body);
    }
    if article.description.trim().is_empty() {
        article.description = derive_description(&article.body);
    }
    if article.icon.trim().is_empty() {
        article.icon = derive_icon(&article.title);
    }
}

/// Gives body-less or HTML articles fixed values for still-empty fields.
fn fill_placeholders(collection: &mut ArticleCollection) {
    for article in collection.iter_mut() {
        let (description, icon) = match article.format {
            BodyFormat::Markdown => (GENERIC_DESCRIPTION, DEFAULT_ICON),
            BodyFormat::Html => (HTML_DESCRIPTION, HTML_ICON),
        };
        if article.title.trim().is_empty() {
            article.title = UNTITLED.to_string();
        }
        if article.description.trim().is_empty() {
            article.description = description.to_string();
        }
        if article.icon.trim().is_empty() {
            article.icon = icon.to_string();
        }
    }
}

fn to_tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|tag| (*tag).to_string()).collect()
}

fn log_skipped(err: &IngestError) {
    warn!("event=content_item module=store status=skip error={err}");
}

#[cfg(test)]
mod tests {
    use super::date_prefix;
    use chrono::NaiveDate;

    #[test]
    fn date_prefix_reads_leading_iso_date() {
        assert_eq!(
            date_prefix("2025-08-26-go-history"),
            NaiveDate::from_ymd_opt(2025, 8, 26)
        );
        assert_eq!(date_prefix("2025-08-26"), NaiveDate::from_ymd_opt(2025, 8, 26));
    }

    #[test]
    fn date_prefix_rejects_other_shapes() {
        assert_eq!(date_prefix("go-history"), None);
        assert_eq!(date_prefix("2025_08_26-post"), None);
        assert_eq!(date_prefix("2025-13-40-post"), None);
        assert_eq!(date_prefix("2025-8-6"), None);
        assert_eq!(date_prefix("日本語のファイル名です"), None);
    }
}
