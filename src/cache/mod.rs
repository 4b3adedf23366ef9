//! Cache Module
//!
//! Provides the proxy's local in-memory cache with TTL expiration and LRU
//! eviction. Knows nothing about HTTP or the backing store.

mod entry;
mod local;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use local::LocalCache;
pub use stats::CacheStats;
pub use store::CacheStore;
