use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("'count' must be a non-negative integer, got {0:?}")]
    InvalidCount(String),

    #[error("Invalid form submission: {0}")]
    Form(#[from] FormRejection),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        warn!("Rejecting request: {}", self);

        let status = match self {
            WebError::InvalidCount(_) => StatusCode::BAD_REQUEST,
            WebError::Form(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({"message": self.to_string()}))).into_response()
    }
}
