use axum::{
    extract::{rejection::FormRejection, Query, State},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use ns_core::{SourceFilter, SourceList};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::error::WebError;
use crate::AppState;

const CLIENT_PAGE: &str = include_str!("../templates/client.html");
const RESULTS_PAGE: &str = include_str!("../templates/results.html");

#[derive(Debug, Deserialize)]
pub struct CountForm {
    pub count: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleForm {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsForm {
    pub keywords: String,
}

#[derive(Debug, Deserialize)]
pub struct SourceForm {
    pub source: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SourcesQuery {
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub clear_cache: bool,
}

fn parse_count(raw: &str) -> Result<usize, WebError> {
    raw.trim()
        .parse()
        .map_err(|_| WebError::InvalidCount(raw.to_string()))
}

pub async fn fetch_top_headlines(
    State(state): State<Arc<AppState>>,
    form: Result<Form<CountForm>, FormRejection>,
) -> Result<Html<&'static str>, WebError> {
    let Form(form) = form?;
    let count = parse_count(&form.count)?;
    info!("🔎 Top {} headlines", count);
    let results = state.news.top_headlines(count, false).await;
    state.store_results(results).await;
    Ok(Html(RESULTS_PAGE))
}

pub async fn search_by_title(
    State(state): State<Arc<AppState>>,
    form: Result<Form<TitleForm>, FormRejection>,
) -> Result<Html<&'static str>, WebError> {
    let Form(form) = form?;
    info!("🔎 Title search: {}", form.title);
    let results = state.news.search_by_title(&form.title).await;
    state.store_results(results).await;
    Ok(Html(RESULTS_PAGE))
}

pub async fn search_by_keywords(
    State(state): State<Arc<AppState>>,
    form: Result<Form<KeywordsForm>, FormRejection>,
) -> Result<Html<&'static str>, WebError> {
    let Form(form) = form?;
    info!("🔎 Keyword search: {}", form.keywords);
    let results = state.news.search_by_keywords(&form.keywords).await;
    state.store_results(results).await;
    Ok(Html(RESULTS_PAGE))
}

pub async fn search_by_source(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SourceForm>, FormRejection>,
) -> Result<Html<&'static str>, WebError> {
    let Form(form) = form?;
    info!("🔎 Articles from source: {}", form.source);
    let results = state.news.articles_from_source(&form.source).await;
    state.store_results(results).await;
    Ok(Html(RESULTS_PAGE))
}

pub async fn search_page() -> Html<&'static str> {
    Html(CLIENT_PAGE)
}

pub async fn access_results(State(state): State<Arc<AppState>>) -> Response {
    match state.results().await {
        Some(results) => Json(results).into_response(),
        None => Json(json!({})).into_response(),
    }
}

pub async fn access_sources(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SourcesQuery>,
) -> Json<SourceList> {
    let filter = SourceFilter::new(
        query.category.as_deref(),
        query.language.as_deref(),
        query.country.as_deref(),
    )
    .or(&state.default_sources);
    Json(state.news.sources(&filter, query.clear_cache).await)
}
