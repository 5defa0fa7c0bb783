//! Error types for the gateway crate.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The query string or body is missing the CPF, or is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The route exists but does not accept the request method.
    #[error("method not allowed")]
    MethodNotAllowed {
        /// Value for the `Allow` response header, e.g. `"GET, POST"`.
        allow: &'static str,
    },

    /// The request body exceeds the configured limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// No route matches the request path.
    #[error("not found")]
    NotFound,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = Json(json!({"error": self.to_string()}));
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, body).into_response(),
            GatewayError::MethodNotAllowed { allow } => {
                (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, allow)], body).into_response()
            }
            GatewayError::PayloadTooLarge(_) => {
                (StatusCode::PAYLOAD_TOO_LARGE, body).into_response()
            }
            GatewayError::NotFound => (StatusCode::NOT_FOUND, body).into_response(),
        }
    }
}
