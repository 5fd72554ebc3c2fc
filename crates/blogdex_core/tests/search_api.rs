use blogdex_core::{
    list, render_detail, search, Article, ArticleService, ContentStore, DetailFormat, DetailView,
    ListingParams, SearchParams,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

fn service() -> ArticleService<ContentStore> {
    let date = |day| NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
    let mut one = Article::new("go-one", date(1));
    one.title = "Go one".to_string();
    one.description = "first".to_string();
    one.tags = vec!["Go".to_string()];
    one.body = "body one".to_string();
    let mut two = Article::new("go-two", date(2));
    two.title = "Go two".to_string();
    let mut three = Article::new("go-three", date(3));
    three.title = "Go three".to_string();
    let mut hidden = Article::new("go-hidden", date(4));
    hidden.title = "Go hidden".to_string();
    hidden.published = false;

    ArticleService::new(ContentStore::from_articles(vec![one, two, three, hidden]))
}

#[test]
fn total_reports_truncated_count() {
    let service = service();
    let response = search(&service, &SearchParams::from_query("q=go&limit=1"));
    assert_eq!(response.total, 1);
    assert_eq!(response.posts.len(), 1);
    assert_eq!(response.posts[0].id, "go-three");
}

#[test]
fn malformed_limit_uses_default() {
    let service = service();
    let response = search(&service, &SearchParams::from_query("q=go&limit=lots"));
    assert_eq!(response.total, 3);
    assert_eq!(response.query, "go");
}

#[test]
fn zero_limit_returns_nothing() {
    let service = service();
    let response = search(&service, &SearchParams::from_query("q=go&limit=0"));
    assert_eq!(response.total, 0);
    assert!(response.posts.is_empty());
}

#[test]
fn search_response_json_shape() {
    let service = service();
    let response = search(&service, &SearchParams::from_query("?q=first&limit=5"));
    let value: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

    assert_eq!(value["total"], json!(1));
    assert_eq!(value["query"], json!("first"));
    let post = &value["posts"][0];
    assert_eq!(post["slug"], json!("go-one"));
    assert_eq!(post["title"], json!("Go one"));
    assert_eq!(post["created_date"], json!("2025-03-01"));
    assert_eq!(post["content"], json!("body one"));
    assert_eq!(post["content_type"], json!("markdown"));
    assert_eq!(post["tags"], json!(["Go"]));
}

#[test]
fn listing_applies_query_and_tag_from_query_string() {
    let service = service();
    let page = list(&service, &ListingParams::from_query("tag=go&q=GO"));
    let ids = page.posts.iter().map(|a| a.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["go-one"]);
    assert_eq!(page.tag, "go");

    let everything = list(&service, &ListingParams::default());
    assert_eq!(everything.posts.len(), 3);
}

#[test]
fn detail_formats_share_one_lookup() {
    let service = service();

    match render_detail(&service, "go-one.json").unwrap() {
        DetailView::Json(projection) => {
            let value = serde_json::to_value(projection).unwrap();
            assert_eq!(
                value,
                json!({"title": "Go one", "slug": "go-one", "description": "first"})
            );
        }
        other => panic!("expected json view, got {other:?}"),
    }

    match render_detail(&service, "go-one.md").unwrap() {
        DetailView::Markdown(markdown) => {
            assert!(markdown.starts_with("# Go one\n\nfirst\n\n"));
            assert!(markdown.contains("**作成日:** 2025年03月01日"));
            assert!(markdown.contains("**タグ:** [\"Go\"]"));
            assert!(markdown.ends_with("---\n\nbody one"));
        }
        other => panic!("expected markdown view, got {other:?}"),
    }

    let html = render_detail(&service, "go-two").unwrap();
    assert_eq!(html.format(), DetailFormat::Html);
    match html {
        DetailView::Html(detail) => {
            assert_eq!(detail.article.id, "go-two");
            assert_eq!(detail.adjacent.previous.unwrap().id, "go-one");
            assert_eq!(detail.adjacent.next.unwrap().id, "go-three");
        }
        other => panic!("expected html view, got {other:?}"),
    }
}

#[test]
fn unknown_and_unpublished_slugs_are_not_found() {
    let service = service();
    assert!(render_detail(&service, "missing").is_err());
    assert!(render_detail(&service, "go-hidden.json").is_err());
    assert!(render_detail(&service, "go-hidden.md").is_err());
}
