//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Page not found at the given path.
    ///
    /// Also covers pages whose content failed to materialize; the handler
    /// logs the underlying cause and downgrades to not-found.
    #[error("Page not found: {0}")]
    PageNotFound(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PageNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Page not found", "path": path}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
