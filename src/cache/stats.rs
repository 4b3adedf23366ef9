//! Cache Statistics Module
//!
//! Tracks local cache activity: hits, misses, evictions and expirations.

// == Cache Stats ==
/// Snapshot of local cache counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the local cache
    pub hits: u64,
    /// Lookups that fell through to the backing store
    pub misses: u64,
    /// Entries removed to make room under the capacity bound
    pub evictions: u64,
    /// Entries removed by the expiry sweep
    pub expirations: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Operations ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter (capacity pressure).
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Increments the expiration counter (TTL sweep).
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }
}
