//! Web error types for the snapshot server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error type for web API operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Bad request with validation error.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Store I/O failure.
    #[error("Store error: {0}")]
    Store(#[from] std::io::Error),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            WebError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad Request", Some(msg.clone()))
            }
            WebError::Store(e) => {
                tracing::error!("Snapshot store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Store Error", None)
            }
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
