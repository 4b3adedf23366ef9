//! Redis Proxy - A caching HTTP proxy in front of Redis
//!
//! Serves reads from a bounded local cache with TTL expiration and LRU
//! eviction, falls back to Redis on miss, and writes updates through to Redis.

pub mod api;
pub mod backing;
pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod proxy;
pub mod tasks;

pub use api::{create_router, AppState, ConcurrencyLimit};
pub use backing::{BackingStore, InMemoryStore, RedisStore};
pub use cache::LocalCache;
pub use config::{AppMode, Config};
pub use error::ProxyError;
pub use proxy::Coordinator;
pub use tasks::spawn_expiry_task;
