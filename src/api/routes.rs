//! API Routes
//!
//! Configures the Axum router: every non-root path is a key.

use axum::{extract::DefaultBodyLimit, middleware, routing::any, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{payload_handler, root_handler, AppState};
use super::middleware::{limit_concurrency, ConcurrencyLimit};

/// Creates the proxy router.
///
/// # Endpoints
/// - `GET /<key>` - Read through the local cache to the backing store
/// - `PUT /<key>` - Write the request body through to the backing store
/// - `/` - Always 400, there is no key
///
/// Request bodies are not size-limited: a value is as large as the backing
/// store accepts.
///
/// # Middleware
/// - Admission control, when `admission` is set
/// - Tracing: Logs all requests
pub fn create_router(state: AppState, admission: Option<ConcurrencyLimit>) -> Router {
    let mut router = Router::new()
        .route("/", any(root_handler))
        .route(
            "/*key",
            any(payload_handler).layer(DefaultBodyLimit::disable()),
        );

    if let Some(limit) = admission {
        router = router.layer(middleware::from_fn_with_state(limit, limit_concurrency));
    }

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
