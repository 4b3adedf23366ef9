//! Redis backing store
//!
//! Uses a `ConnectionManager`: one multiplexed connection shared by every
//! request, re-established automatically after a connection error.

use std::time::Duration;

use ::redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use async_trait::async_trait;
use tracing::info;

use super::BackingStore;
use crate::error::{ProxyError, Result};

/// Redis client used as the proxy's backing store.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    url: String,
    /// Expiry applied to every key written through the proxy
    key_ttl: Option<Duration>,
}

impl RedisStore {
    /// Connects to Redis and verifies the connection with `PING`.
    ///
    /// # Arguments
    ///
    /// * `address` - `host:port` or a full `redis://` / `rediss://` URL
    /// * `key_ttl` - Optional expiry for keys written by `put`
    pub async fn connect(address: &str, key_ttl: Option<Duration>) -> Result<Self> {
        let url = redis_url(address);
        let client = Client::open(url.as_str())
            .map_err(|e| unavailable("Failed to create Redis client", e))?;

        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| unavailable("Failed to connect to Redis", e))?;

        let pong: String = ::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| unavailable("Redis PING failed", e))?;
        info!("Connected to Redis at {} ({})", url, pong);

        Ok(Self {
            conn,
            url,
            key_ttl: key_ttl.filter(|ttl| ttl.as_millis() > 0),
        })
    }
}

#[async_trait]
impl BackingStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| unavailable("Redis GET failed", e))
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let result: ::redis::RedisResult<()> = match self.key_ttl {
            Some(ttl) => conn.pset_ex(key, value, ttl.as_millis() as u64).await,
            None => conn.set(key, value).await,
        };
        result.map_err(|e| unavailable("Redis SET failed", e))
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("url", &self.url)
            .field("key_ttl", &self.key_ttl)
            .finish()
    }
}

fn unavailable(context: &str, err: RedisError) -> ProxyError {
    ProxyError::BackingStoreUnavailable(format!("{}: {}", context, err))
}

/// Accepts the bare `host:port` form and prefixes the `redis://` scheme.
fn redis_url(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("redis://{}", address)
    }
}
