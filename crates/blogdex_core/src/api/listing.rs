//! Listing page adapter (`q` and `tag`).

use crate::api::query_value;
use crate::model::article::Article;
use crate::service::article_service::ArticleService;
use crate::store::ArticleRepository;
use serde::Serialize;

/// Parsed listing filters; empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingParams {
    pub query: String,
    pub tag: String,
}

impl ListingParams {
    pub fn from_query(raw: &str) -> Self {
        Self {
            query: query_value(raw, "q").unwrap_or_default(),
            tag: query_value(raw, "tag").unwrap_or_default(),
        }
    }
}

/// Data handed to the listing template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingPage<'a> {
    pub posts: Vec<&'a Article>,
    pub query: String,
    pub tag: String,
}

pub fn list<'a, R: ArticleRepository>(
    service: &'a ArticleService<R>,
    params: &ListingParams,
) -> ListingPage<'a> {
    ListingPage {
        posts: service.list_articles(&params.query, &params.tag),
        query: params.query.clone(),
        tag: params.tag.clone(),
    }
}
