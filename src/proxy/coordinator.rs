//! Read/Write-Through Coordinator
//!
//! Orchestrates lookups and updates across the local cache and the backing
//! store. The backing store is authoritative; local cache writes are
//! best-effort and happen on detached tasks the caller never waits for.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use crate::backing::BackingStore;
use crate::cache::LocalCache;
use crate::error::{ProxyError, Result};

/// Coordinates the local cache with the backing store.
pub struct Coordinator {
    cache: LocalCache,
    store: Arc<dyn BackingStore>,
    /// Outstanding cache fills, drained on shutdown
    fills: TaskTracker,
    /// Upper bound on each backing-store call, None = wait indefinitely
    backing_timeout: Option<Duration>,
}

impl Coordinator {
    /// Creates a coordinator with no backing-store timeout.
    pub fn new(cache: LocalCache, store: Arc<dyn BackingStore>) -> Self {
        Self {
            cache,
            store,
            fills: TaskTracker::new(),
            backing_timeout: None,
        }
    }

    /// Bounds every backing-store call; an elapsed call counts as unavailable.
    pub fn with_backing_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.backing_timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    /// The local cache this coordinator fills.
    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    // == Handle Get ==
    /// Looks up `key`, local cache first, then the backing store.
    ///
    /// Returns `Ok(None)` when the key exists in neither tier. A backing-store
    /// failure is returned as an error, never as a miss. A value fetched from
    /// the backing store is copied into the local cache in the background.
    pub async fn handle_get(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.cache.get(key).await {
            debug!("Local cache hit for '{}'", key);
            return Ok(Some(value));
        }

        debug!("Local cache miss for '{}', querying backing store", key);
        let fetched = self
            .call_backing("GET", self.store.get(key))
            .await
            .inspect_err(|e| warn!("Backing store GET for '{}' failed: {}", key, e))?;

        match fetched {
            Some(value) => {
                self.spawn_fill(key.to_string(), value.clone());
                Ok(Some(value))
            }
            None => {
                debug!("Key '{}' not found in backing store", key);
                Ok(None)
            }
        }
    }

    // == Handle Put ==
    /// Writes `value` under `key` to both tiers.
    ///
    /// The local write is started first and not awaited; the backing-store
    /// write is awaited and its failure returned. After a failed backing write
    /// the local cache may still hold `value` until it is evicted or expires.
    pub async fn handle_put(&self, key: &str, value: &str) -> Result<()> {
        self.spawn_fill(key.to_string(), value.to_string());

        self.call_backing("PUT", self.store.put(key, value))
            .await
            .inspect_err(|e| warn!("Backing store PUT for '{}' failed: {}", key, e))
    }

    fn spawn_fill(&self, key: String, value: String) {
        let cache = self.cache.clone();
        self.fills.spawn(async move {
            cache.put(key, value).await;
        });
    }

    async fn call_backing<T, F>(&self, op: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.backing_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                ProxyError::BackingStoreUnavailable(format!(
                    "Backing store {} timed out after {:?}",
                    op, limit
                ))
            })?,
            None => call.await,
        }
    }

    /// Number of cache fills spawned but not yet finished.
    pub fn pending_fills(&self) -> usize {
        self.fills.len()
    }

    /// Waits until every cache fill spawned so far has finished.
    pub async fn settle(&self) {
        self.fills.close();
        self.fills.wait().await;
        self.fills.reopen();
    }

    /// Waits for outstanding cache fills before the process exits.
    pub async fn shutdown(&self) {
        self.fills.close();
        self.fills.wait().await;
        debug!("All cache fills drained");
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("cache", &self.cache)
            .field("pending_fills", &self.fills.len())
            .field("backing_timeout", &self.backing_timeout)
            .finish()
    }
}
