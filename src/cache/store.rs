//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU eviction and TTL
//! expiration. `CacheStore` is not synchronized; `LocalCache` owns one behind
//! its lock. Every operation takes the current instant so callers read the
//! clock once per critical section.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Bounded key/value storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed, 0 = unbounded
    capacity: usize,
    /// Lifetime of an entry from its last write, None = never expires
    ttl: Option<Duration>,
    /// Monotonic access counter
    next_seq: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, 0 for no bound
    /// * `ttl` - Entry lifetime from insertion; `None` or zero disables expiry
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            capacity,
            ttl: ttl.filter(|ttl| !ttl.is_zero()),
            next_seq: 0,
        }
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    // == Put ==
    /// Stores a key-value pair, resetting its access time and expiry.
    ///
    /// If the cache is at capacity and `key` is new, the least recently used
    /// entry is evicted first. Returns the evicted key, if any.
    pub fn put(&mut self, key: String, value: String, now: Instant) -> Option<String> {
        let mut evicted = None;

        if self.capacity > 0
            && self.entries.len() >= self.capacity
            && !self.entries.contains_key(&key)
        {
            evicted = self.least_recently_used();
            if let Some(victim) = &evicted {
                self.entries.remove(victim);
                self.stats.record_eviction();
            }
        }

        let seq = self.bump_seq();
        let entry = CacheEntry::new(value, now, seq, self.ttl);
        self.entries.insert(key, entry);

        evicted
    }

    /// Key with the oldest access; equal instants fall back to access order.
    fn least_recently_used(&self) -> Option<String> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.recency())
            .map(|(key, _)| key.clone())
    }

    // == Get ==
    /// Retrieves a value by key and marks the entry as recently used.
    ///
    /// Expiry is not checked here; expired entries are removed by the sweep.
    pub fn get(&mut self, key: &str, now: Instant) -> Option<String> {
        let seq = self.next_seq + 1;
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch(now, seq);
                let value = entry.value.clone();
                self.next_seq = seq;
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Expired Keys ==
    /// Returns every key whose entry has expired at `now`.
    pub fn expired_keys(&self, now: Instant) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Remove If Expired ==
    /// Removes `key` only if it is still expired at `now`.
    ///
    /// Returns false when the key is gone or was rewritten with a fresh expiry.
    pub fn remove_if_expired(&mut self, key: &str, now: Instant) -> bool {
        let expired = self
            .entries
            .get(key)
            .map(|entry| entry.is_expired_at(now))
            .unwrap_or(false);

        if expired {
            self.entries.remove(key);
            self.stats.record_expiration();
        }
        expired
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    /// Returns the configured capacity (0 = unbounded).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the configured entry lifetime.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Returns true if `key` currently has an entry, without touching it.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a copy of the entry for `key`, without touching it.
    pub fn peek(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).cloned()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100, Some(secs(300)));
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.ttl(), Some(secs(300)));
    }

    #[test]
    fn test_zero_ttl_means_no_expiry() {
        let store = CacheStore::new(0, Some(Duration::ZERO));
        assert_eq!(store.ttl(), None);
    }

    #[test]
    fn test_store_put_and_get() {
        let now = Instant::now();
        let mut store = CacheStore::new(100, None);

        store.put("key1".to_string(), "value1".to_string(), now);

        assert_eq!(store.get("key1", now), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(100, None);
        assert_eq!(store.get("nonexistent", Instant::now()), None);
    }

    #[test]
    fn test_store_overwrite() {
        let now = Instant::now();
        let mut store = CacheStore::new(100, None);

        store.put("key1".to_string(), "value1".to_string(), now);
        store.put("key1".to_string(), "value2".to_string(), now);

        assert_eq!(store.get("key1", now), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unbounded_store_never_evicts() {
        let now = Instant::now();
        let mut store = CacheStore::new(0, None);

        for i in 0..500 {
            assert_eq!(store.put(format!("key{}", i), "v".to_string(), now), None);
        }
        assert_eq!(store.len(), 500);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_lru_eviction() {
        let now = Instant::now();
        let mut store = CacheStore::new(3, None);

        store.put("key1".to_string(), "value1".to_string(), now);
        store.put("key2".to_string(), "value2".to_string(), now);
        store.put("key3".to_string(), "value3".to_string(), now);

        // Cache is full, adding key4 should evict key1 (oldest)
        let evicted = store.put("key4".to_string(), "value4".to_string(), now);

        assert_eq!(evicted, Some("key1".to_string()));
        assert_eq!(store.len(), 3);
        assert!(!store.contains_key("key1"));
        assert!(store.contains_key("key2"));
        assert!(store.contains_key("key3"));
        assert!(store.contains_key("key4"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let t0 = Instant::now();
        let mut store = CacheStore::new(2, Some(secs(1)));

        store.put("a".to_string(), "1".to_string(), t0);
        store.put("b".to_string(), "2".to_string(), t0 + Duration::from_millis(10));
        store.get("a", t0 + Duration::from_millis(20));
        store.put("c".to_string(), "3".to_string(), t0 + Duration::from_millis(30));

        let now = t0 + Duration::from_millis(40);
        assert_eq!(store.get("b", now), None);
        assert_eq!(store.get("a", now), Some("1".to_string()));
        assert_eq!(store.get("c", now), Some("3".to_string()));
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let now = Instant::now();
        let mut store = CacheStore::new(2, None);

        store.put("a".to_string(), "1".to_string(), now);
        store.put("b".to_string(), "2".to_string(), now);
        let evicted = store.put("a".to_string(), "updated".to_string(), now);

        assert_eq!(evicted, None);
        assert_eq!(store.len(), 2);
        assert!(store.contains_key("b"));
    }

    #[test]
    fn test_get_does_not_extend_expiry() {
        let t0 = Instant::now();
        let mut store = CacheStore::new(10, Some(secs(1)));

        store.put("k".to_string(), "v".to_string(), t0);
        let expires_at = store.peek("k").unwrap().expires_at;

        store.get("k", t0 + Duration::from_millis(900));

        assert_eq!(store.peek("k").unwrap().expires_at, expires_at);
        assert_eq!(store.expired_keys(t0 + secs(2)), vec!["k".to_string()]);
    }

    #[test]
    fn test_put_resets_expiry() {
        let t0 = Instant::now();
        let mut store = CacheStore::new(10, Some(secs(1)));

        store.put("k".to_string(), "v1".to_string(), t0);
        store.put("k".to_string(), "v2".to_string(), t0 + secs(1));

        assert!(store.expired_keys(t0 + Duration::from_millis(1500)).is_empty());
    }

    #[test]
    fn test_expired_keys_and_removal() {
        let t0 = Instant::now();
        let mut store = CacheStore::new(10, Some(secs(1)));

        store.put("old".to_string(), "v".to_string(), t0);
        store.put("new".to_string(), "v".to_string(), t0 + secs(5));

        let now = t0 + secs(2);
        let expired = store.expired_keys(now);
        assert_eq!(expired, vec!["old".to_string()]);

        assert!(store.remove_if_expired("old", now));
        assert!(!store.remove_if_expired("new", now));
        assert!(!store.remove_if_expired("missing", now));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_remove_if_expired_rechecks_refreshed_entry() {
        let t0 = Instant::now();
        let mut store = CacheStore::new(10, Some(secs(1)));

        store.put("k".to_string(), "v1".to_string(), t0);
        let scan_time = t0 + secs(2);
        let candidates = store.expired_keys(scan_time);
        assert_eq!(candidates.len(), 1);

        // Rewritten between the scan and the delete
        store.put("k".to_string(), "v2".to_string(), scan_time);

        assert!(!store.remove_if_expired("k", scan_time));
        assert_eq!(store.get("k", scan_time), Some("v2".to_string()));
    }

    #[test]
    fn test_no_ttl_never_expires() {
        let t0 = Instant::now();
        let mut store = CacheStore::new(10, None);

        store.put("k".to_string(), "v".to_string(), t0);

        assert!(store.expired_keys(t0 + secs(86_400)).is_empty());
    }

    #[test]
    fn test_store_stats() {
        let now = Instant::now();
        let mut store = CacheStore::new(100, None);

        store.put("key1".to_string(), "value1".to_string(), now);
        store.get("key1", now); // hit
        store.get("nonexistent", now); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
