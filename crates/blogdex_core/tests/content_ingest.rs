use blogdex_core::{
    ArticleCollection, ArticleRepository, BodyFormat, ContentConfig, ContentStore, Ingestor,
};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn ingest(config: ContentConfig) -> ArticleCollection {
    Ingestor::with_today(config, today()).ingest().0
}

#[test]
fn markdown_files_get_derived_metadata_and_date_prefix() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "2024-03-05-go-history.md",
        "# Goの歴史\n\nGo言語がどのように生まれたかを振り返る記事です。\n",
    );
    write(dir.path(), "nested/no-date.md", "本文だけ\n");

    let collection = ingest(ContentConfig::new(dir.path()));
    assert_eq!(collection.len(), 2);

    let dated = collection.get("2024-03-05-go-history").unwrap();
    assert_eq!(dated.title, "Goの歴史");
    assert_eq!(dated.icon, "🐹");
    assert_eq!(dated.description, "Go言語がどのように生まれたかを振り返る記事です。");
    assert_eq!(dated.created_at, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    assert_eq!(dated.tags, vec!["Markdown".to_string(), "ブログ".to_string()]);
    assert_eq!(dated.format, BodyFormat::Markdown);

    let undated = collection.get("no-date").unwrap();
    assert_eq!(undated.created_at, today());
    assert_eq!(undated.title, "untitled");
}

#[test]
fn html_files_get_fixed_defaults_and_raw_body() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "page.html", "<h1>Rust</h1><p>hello</p>");

    let collection = ingest(ContentConfig::new(dir.path()));
    let page = collection.get("page").unwrap();
    assert_eq!(page.format, BodyFormat::Html);
    assert_eq!(page.title, "HTML記事: page");
    assert_eq!(page.icon, "📄");
    assert_eq!(page.body, "<h1>Rust</h1><p>hello</p>");
}

#[test]
fn manifest_entry_with_html_body_gets_html_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("articles");
    write(&content, "landing.html", "<p>landing</p>");
    let manifest = dir.path().join("metadata.json");
    fs::write(
        &manifest,
        r#"[{"id": "landing", "path": "landing.html", "title": "Landing"}]"#,
    )
    .unwrap();

    let collection = ingest(ContentConfig::new(&content).with_manifest(&manifest));
    let landing = collection.get("landing").unwrap();
    assert_eq!(landing.format, BodyFormat::Html);
    assert_eq!(landing.body, "<p>landing</p>");
    assert_eq!(landing.title, "Landing");
    assert_eq!(landing.description, "HTMLで作成された記事");
}

#[test]
fn manifest_entries_win_and_receive_matching_bodies() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("articles");
    write(&content, "go.md", "# Ignored title\n\n本文の段落はここにあって二十文字を超えています。\n");
    write(&content, "extra.md", "# Extra\n");
    let manifest = dir.path().join("metadata.json");
    fs::write(
        &manifest,
        r#"{"files": [
            {"id": "go-history", "path": "articles/go.md", "title": "Goの歴史",
             "tags": ["Go", "歴史"], "created": "2023-01-02"},
            {"id": "draft", "title": "下書き", "published": false},
            {"id": "bad id"},
            {"title": "no id at all"}
        ]}"#,
    )
    .unwrap();

    let (collection, report) =
        Ingestor::with_today(ContentConfig::new(&content).with_manifest(&manifest), today())
            .ingest();

    assert_eq!(report.manifest_entries, 2);
    assert_eq!(report.attached, 1);
    assert_eq!(report.scanned, 1);
    assert_eq!(report.skipped, 2);

    let ids = collection.ids().collect::<Vec<_>>();
    assert_eq!(ids, vec!["go-history", "draft", "extra"]);

    let go = collection.get("go-history").unwrap();
    assert_eq!(go.title, "Goの歴史");
    assert_eq!(go.icon, "🐹");
    assert_eq!(go.tags, vec!["Go".to_string(), "歴史".to_string()]);
    assert_eq!(go.created_at, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    assert!(go.body.contains("本文の段落"));
    assert_eq!(go.description, "本文の段落はここにあって二十文字を超えています。");

    let draft = collection.get("draft").unwrap();
    assert!(!draft.published);
    assert!(!draft.has_body());
    assert_eq!(draft.description, "Markdownで作成された記事");
}

#[test]
fn file_stem_colliding_with_manifest_id_is_a_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("articles");
    write(&content, "intro.md", "# From file\n");
    let manifest = dir.path().join("metadata.json");
    fs::write(&manifest, r#"[{"id": "intro", "title": "From manifest"}]"#).unwrap();

    let (collection, report) =
        Ingestor::with_today(ContentConfig::new(&content).with_manifest(&manifest), today())
            .ingest();
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get("intro").unwrap().title, "From manifest");
    assert_eq!(report.duplicates, 1);
}

#[test]
fn unusable_manifest_is_skipped_and_scan_continues() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("articles");
    write(&content, "a.md", "# A\n");
    let manifest = dir.path().join("metadata.json");
    fs::write(&manifest, "{not json").unwrap();

    let (collection, report) =
        Ingestor::with_today(ContentConfig::new(&content).with_manifest(&manifest), today())
            .ingest();
    assert_eq!(collection.len(), 1);
    assert_eq!(report.skipped, 1);
}

#[test]
fn repeated_ingestion_adds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.md", "# A\n");
    write(dir.path(), "b.html", "<p>b</p>");
    let ingestor = Ingestor::with_today(ContentConfig::new(dir.path()), today());

    let (mut collection, first) = ingestor.ingest();
    let ids_once = collection.ids().map(str::to_string).collect::<Vec<_>>();
    let second = ingestor.ingest_into(&mut collection);
    let ids_twice = collection.ids().map(str::to_string).collect::<Vec<_>>();

    assert_eq!(first.inserted(), 2);
    assert_eq!(second.inserted(), 0);
    assert_eq!(ids_once, ids_twice);
}

#[test]
fn non_content_extensions_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "notes.txt", "plain text");
    write(dir.path(), "image.png", "binary");
    write(dir.path(), "post.markdown", "# Post\n");

    let collection = ingest(ContentConfig::new(dir.path()));
    assert_eq!(collection.ids().collect::<Vec<_>>(), vec!["post"]);
}

#[test]
fn content_store_loads_lazily_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.md", "# A\n");
    let store = ContentStore::with_ingestor(Ingestor::with_today(
        ContentConfig::new(dir.path()),
        today(),
    ));

    assert!(!store.is_loaded());
    assert_eq!(store.articles().len(), 1);
    assert!(store.is_loaded());
}
