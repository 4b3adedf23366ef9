//! API Module
//!
//! HTTP handlers, admission control and routing for the proxy.
//!
//! # Endpoints
//! - `GET /<key>` - Retrieve a value, local cache first
//! - `PUT /<key>` - Store the request body as the value
//! - anything else - 405, or 400 when the path has no key

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::{limit_concurrency, ConcurrencyLimit};
pub use routes::create_router;
