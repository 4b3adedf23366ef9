//! Error types for the proxy
//!
//! Provides unified error handling using thiserror. A missing key is not an
//! error: lookups return `Option` and only the HTTP layer turns `None` into 404.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;

// == Proxy Error Enum ==
/// Unified error type for the proxy.
#[derive(thiserror::Error, Debug)]
pub enum ProxyError {
    /// The backing store could not be reached, rejected the command, or timed out
    #[error("Backing store unavailable: {0}")]
    BackingStoreUnavailable(String),

    /// Missing key segment or unreadable body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP verb other than GET or PUT
    #[error("Method not allowed: {0}")]
    MethodNotSupported(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::BackingStoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::MethodNotSupported(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body message sent to clients for any backing store failure.
pub const BACKING_STORE_FAILURE: &str = "Backing store unavailable";

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Backing store details stay in the logs
        let message = match self {
            ProxyError::BackingStoreUnavailable(_) => BACKING_STORE_FAILURE.to_string(),
            other => other.to_string(),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (
                ProxyError::BackingStoreUnavailable("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ProxyError::InvalidRequest("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProxyError::MethodNotSupported("DELETE".to_string()),
                StatusCode::METHOD_NOT_ALLOWED,
            ),
            (
                ProxyError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = ProxyError::InvalidRequest("missing key".to_string()).into_response();

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.contains("application/json"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Invalid request: missing key");
    }

    #[tokio::test]
    async fn test_backing_store_detail_not_sent_to_client() {
        let response = ProxyError::BackingStoreUnavailable(
            "Redis GET failed: Connection refused (os error 111) at 10.0.0.5:6379".to_string(),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], BACKING_STORE_FAILURE);
    }
}
