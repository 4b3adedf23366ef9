//! Admission Control
//!
//! Bounds how many requests run the proxy handlers at the same time. Requests
//! over the bound wait for a permit in arrival order; none are rejected.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

use crate::error::{ProxyError, Result};

/// Fixed-size pool of request permits.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimit {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyLimit {
    /// Creates a pool of `limit` permits. `limit` must be greater than zero;
    /// configuration loading rejects zero.
    pub fn new(limit: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Total number of permits.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Permits not currently held by a request.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Waits for a permit. The permit is released when dropped.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ProxyError::Internal("Admission control is closed".to_string()))
    }
}

/// Middleware holding a permit for the whole downstream call.
///
/// The permit drops when this future completes or is dropped, including on
/// error responses and panics inside the handler.
pub async fn limit_concurrency(
    State(limit): State<ConcurrencyLimit>,
    request: Request,
    next: Next,
) -> Response {
    if limit.available() == 0 {
        debug!(
            "Admission limit of {} reached, {} {} waiting",
            limit.limit(),
            request.method(),
            request.uri().path()
        );
    }

    let _permit = match limit.acquire().await {
        Ok(permit) => permit,
        Err(e) => return e.into_response(),
    };

    next.run(request).await
}
