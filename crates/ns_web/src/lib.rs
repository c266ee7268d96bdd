use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::WebError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/search/top_headline_count", post(handlers::fetch_top_headlines))
        .route("/search/title", post(handlers::search_by_title))
        .route("/search/keywords", post(handlers::search_by_keywords))
        .route("/search/source", post(handlers::search_by_source))
        .route("/search", get(handlers::search_page))
        .route("/results", get(handlers::access_results))
        .route("/sources", get(handlers::access_sources))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use ns_core::{ArticleList, Error, Result, SourceList};
}
