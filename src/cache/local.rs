//! Shared Local Cache
//!
//! `LocalCache` is the handle the rest of the proxy uses: a cheaply clonable
//! reference to one `CacheStore` behind a single exclusive lock. Operations
//! never fail and never await anything but the lock.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};

/// Thread-safe, bounded, expiring local cache.
#[derive(Debug, Clone)]
pub struct LocalCache {
    store: Arc<Mutex<CacheStore>>,
    capacity: usize,
    ttl: Option<Duration>,
}

impl LocalCache {
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, 0 for no bound
    /// * `ttl` - Entry lifetime from insertion; `None` or zero disables expiry
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        let store = CacheStore::new(capacity, ttl);
        let ttl = store.ttl();
        Self {
            store: Arc::new(Mutex::new(store)),
            capacity,
            ttl,
        }
    }

    /// Maximum number of entries (0 = unbounded).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entry lifetime, also the sweep period. `None` disables expiry.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Inserts or overwrites `key`, evicting the least recently used entry if
    /// the cache is full.
    pub async fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let evicted = {
            let mut store = self.store.lock().await;
            store.put(key.clone(), value.into(), Instant::now())
        };

        if let Some(evicted) = evicted {
            debug!("Evicted '{}' to make room for '{}'", evicted, key);
        }
    }

    /// Looks up `key`, refreshing its access time on a hit.
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut store = self.store.lock().await;
        store.get(key, Instant::now())
    }

    /// Removes expired entries and returns how many were removed.
    ///
    /// Candidates are collected under one lock acquisition, then each one is
    /// re-checked and deleted under its own acquisition. A key rewritten in
    /// between keeps its new entry.
    pub async fn expire_sweep(&self) -> usize {
        let candidates = {
            let store = self.store.lock().await;
            store.expired_keys(Instant::now())
        };

        let mut removed = 0;
        for key in candidates {
            let mut store = self.store.lock().await;
            if store.remove_if_expired(&key, Instant::now()) {
                removed += 1;
            }
        }
        removed
    }

    /// Returns a snapshot of the cache counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    /// Returns true if `key` has an entry, without refreshing it.
    pub async fn contains_key(&self, key: &str) -> bool {
        self.store.lock().await.contains_key(key)
    }
}
