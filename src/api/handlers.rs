//! API Handlers
//!
//! Maps `GET /<key>` and `PUT /<key>` onto the coordinator and turns the
//! results into JSON responses.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ProxyError, Result};
use crate::models::{value_from_body, ErrorResponse, KeyValueResponse, ProxyKey};
use crate::proxy::Coordinator;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read/write-through coordinator
    pub coordinator: Arc<Coordinator>,
}

impl AppState {
    /// Creates a new AppState around the given coordinator.
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self { coordinator }
    }
}

/// Handler for any request to `/`: there is no key to act on.
pub async fn root_handler() -> ProxyError {
    ProxyError::InvalidRequest("Request path has no key".to_string())
}

/// Handler for any request to `/<key>`.
///
/// The key is validated before the method, so a keyless path is a 400 for
/// every verb.
pub async fn payload_handler(
    State(state): State<AppState>,
    method: Method,
    path: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Response> {
    let Path(path) = path.map_err(|e| ProxyError::InvalidRequest(e.body_text()))?;
    let key = ProxyKey::from_path(&path)?.into_inner();

    match method {
        Method::GET => get_value(&state, key).await,
        Method::PUT => {
            let body = body.map_err(|e| ProxyError::InvalidRequest(e.body_text()))?;
            let value = value_from_body(&body)?;
            put_value(&state, key, value).await
        }
        other => Err(ProxyError::MethodNotSupported(other.to_string())),
    }
}

async fn get_value(state: &AppState, key: String) -> Result<Response> {
    match state.coordinator.handle_get(&key).await? {
        Some(value) => Ok(Json(KeyValueResponse::new(key, value)).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Key not found: {}", key))),
        )
            .into_response()),
    }
}

async fn put_value(state: &AppState, key: String, value: String) -> Result<Response> {
    state.coordinator.handle_put(&key, &value).await?;
    Ok(Json(KeyValueResponse::new(key, value)).into_response())
}
