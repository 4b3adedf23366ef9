//! In-memory backing store
//!
//! A process-local stand-in for Redis. Several proxies can share one instance
//! through an `Arc`, the way several proxy processes share one Redis. Outages
//! and latency can be injected to exercise the failure paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BackingStore;
use crate::error::{ProxyError, Result};

/// Map-backed implementation of [`BackingStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
    unavailable: AtomicBool,
    latency_ms: AtomicU64,
    gets: AtomicU64,
    puts: AtomicU64,
}

impl InMemoryStore {
    /// Creates an empty, reachable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates an outage: while set, every call fails.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delays every call by `latency` before it runs.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// Writes directly, bypassing outages and latency, like a second client.
    pub async fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().await.insert(key.into(), value.into());
    }

    /// Reads directly, bypassing outages, latency and call counters.
    pub async fn value(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Number of `get` calls made through the trait.
    pub fn get_calls(&self) -> u64 {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `put` calls made through the trait.
    pub fn put_calls(&self) -> u64 {
        self.puts.load(Ordering::SeqCst)
    }

    async fn simulate_network(&self) -> Result<()> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProxyError::BackingStoreUnavailable(
                "In-memory store is marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl BackingStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.simulate_network().await?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.simulate_network().await?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
