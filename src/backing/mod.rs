//! Backing Store Module
//!
//! The authoritative key-value store behind the proxy, abstracted as a
//! capability with exactly `get` and `put`.
//!
//! # Implementations
//! - `RedisStore`: Redis over a multiplexed, auto-reconnecting connection
//! - `InMemoryStore`: in-process map with fault and latency injection, for tests

mod memory;
mod redis;

use async_trait::async_trait;

use crate::error::Result;

pub use self::memory::InMemoryStore;
pub use self::redis::RedisStore;

/// Source of truth for the proxy's key space.
///
/// `get` distinguishes a missing key (`Ok(None)`) from a failure to reach the
/// store (`Err(ProxyError::BackingStoreUnavailable)`).
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Fetches the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`.
    async fn put(&self, key: &str, value: &str) -> Result<()>;
}
