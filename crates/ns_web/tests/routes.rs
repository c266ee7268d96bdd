use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use ns_core::raw::{RawArticle, RawSource};
use ns_core::{Error, EverythingQuery, HeadlinesQuery, NewsApi, Result, SourceFilter};
use ns_source::NewsSource;
use ns_web::{create_app, AppState};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct StubApi {
    source_calls: Mutex<Vec<SourceFilter>>,
}

fn titled(title: &str) -> RawArticle {
    RawArticle {
        title: Some(title.to_string()),
        content: Some("null".to_string()),
        ..Default::default()
    }
}

#[async_trait]
impl NewsApi for StubApi {
    async fn everything(&self, _api_key: &str, query: &EverythingQuery) -> Result<Vec<RawArticle>> {
        match query {
            EverythingQuery::Keywords(k) if k == "fail" => Err(Error::api("unexpectedError", "boom")),
            EverythingQuery::Keywords(k) => Ok(vec![titled(&format!("keywords:{}", k))]),
            EverythingQuery::Title(t) => Ok(vec![titled(&format!("title:{}", t))]),
            EverythingQuery::Source(s) => Ok(vec![titled(&format!("source:{}", s))]),
        }
    }

    async fn top_headlines(&self, _api_key: &str, query: &HeadlinesQuery) -> Result<Vec<RawArticle>> {
        Ok((0..query.page_size)
            .map(|i| titled(&format!("headline {}", i)))
            .collect())
    }

    async fn sources(&self, _api_key: &str, filter: &SourceFilter) -> Result<Vec<RawSource>> {
        self.source_calls.lock().unwrap().push(filter.clone());
        Ok(vec![RawSource {
            id: Some("abc-news".to_string()),
            name: Some("ABC News".to_string()),
            language: filter.language.clone(),
            country: filter.country.clone(),
            ..Default::default()
        }])
    }
}

fn app() -> (Arc<StubApi>, Router) {
    let api = Arc::new(StubApi::default());
    let news = Arc::new(NewsSource::new(api.clone(), "test-key"));
    let defaults = SourceFilter::new(None, Some("en"), Some("us"));
    (api, create_app(AppState::new(news, defaults)))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn results(app: &Router) -> Value {
    let (status, body) = get(app, "/results").await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_results_empty_before_first_search() {
    let (_api, app) = app();
    assert_eq!(results(&app).await, json!({}));
}

#[tokio::test]
async fn test_search_page_is_served() {
    let (_api, app) = app();
    let (status, body) = get(&app, "/search").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/search/top_headline_count"));
}

#[tokio::test]
async fn test_keyword_search_stores_results() {
    let (_api, app) = app();

    let (status, body) = post_form(&app, "/search/keywords", "keywords=rust%2Ctokio").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/results"));

    let value = results(&app).await;
    assert_eq!(value["status"], json!("GOOD"));
    assert_eq!(value["count"], json!(1));
    assert_eq!(value["articles"][0]["title"], json!("keywords:rust,tokio"));
    assert_eq!(value["articles"][0]["content"], json!(null));
}

#[tokio::test]
async fn test_title_and_source_searches() {
    let (_api, app) = app();

    post_form(&app, "/search/title", "title=Budget+vote").await;
    assert_eq!(results(&app).await["articles"][0]["title"], json!("title:Budget vote"));

    post_form(&app, "/search/source", "source=bbc-news").await;
    assert_eq!(results(&app).await["articles"][0]["title"], json!("source:bbc-news"));
}

#[tokio::test]
async fn test_failed_search_reports_bad_status() {
    let (_api, app) = app();

    let (status, _) = post_form(&app, "/search/keywords", "keywords=fail").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        results(&app).await,
        json!({"status": "BAD", "count": 0, "articles": []})
    );
}

#[tokio::test]
async fn test_top_headline_count() {
    let (_api, app) = app();

    let (status, _) = post_form(&app, "/search/top_headline_count", "count=3").await;
    assert_eq!(status, StatusCode::OK);

    let value = results(&app).await;
    assert_eq!(value["count"], json!(3));
    assert_eq!(value["articles"][2]["title"], json!("headline 2"));
}

#[tokio::test]
async fn test_invalid_count_is_rejected() {
    let (_api, app) = app();

    let (status, body) = post_form(&app, "/search/top_headline_count", "count=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert!(value["message"].as_str().unwrap().contains("lots"));
    assert_eq!(results(&app).await, json!({}));
}

#[tokio::test]
async fn test_missing_form_field_is_rejected() {
    let (_api, app) = app();

    for (uri, form) in [
        ("/search/top_headline_count", ""),
        ("/search/title", "keywords=x"),
        ("/search/keywords", "title=x"),
        ("/search/source", ""),
    ] {
        let (status, body) = post_form(&app, uri, form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert!(value["message"].as_str().unwrap().starts_with("Invalid form submission"));
    }

    assert_eq!(results(&app).await, json!({}));
}

#[tokio::test]
async fn test_form_without_content_type_is_rejected() {
    let (_api, app) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/search/keywords")
        .body(Body::from("keywords=rust"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert!(value["message"].is_string());
}

#[tokio::test]
async fn test_sources_use_defaults_and_cache() {
    let (api, app) = app();

    let (status, body) = get(&app, "/sources").await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["status"], json!("GOOD"));
    assert_eq!(value["sources"][0]["country"], json!("us"));

    get(&app, "/sources").await;
    assert_eq!(api.source_calls.lock().unwrap().len(), 1);

    get(&app, "/sources?country=gb").await;
    get(&app, "/sources?country=gb&clear_cache=true").await;

    let calls = api.source_calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1], SourceFilter::new(None, Some("en"), Some("gb")));
}

#[tokio::test]
async fn test_warm_sources_fills_cache() {
    let api = Arc::new(StubApi::default());
    let news = Arc::new(NewsSource::new(api.clone(), "test-key"));
    let state = AppState::new(news, SourceFilter::new(None, Some("en"), Some("us")));

    state.warm_sources().await;
    let app = create_app(state);
    get(&app, "/sources").await;

    assert_eq!(api.source_calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cors_headers_present() {
    let (_api, app) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/results")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
