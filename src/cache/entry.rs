//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with access tracking
//! and TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Last time the entry was written or read
    pub last_accessed: Instant,
    /// Store-wide access counter at the last access, orders equal instants
    pub access_seq: u64,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry accessed at `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now` - Insertion instant
    /// * `access_seq` - Access counter value for this insertion
    /// * `ttl` - Optional lifetime measured from `now`
    pub fn new(value: String, now: Instant, access_seq: u64, ttl: Option<Duration>) -> Self {
        Self {
            value,
            last_accessed: now,
            access_seq,
            expires_at: ttl.map(|ttl| now + ttl),
        }
    }

    // == Touch ==
    /// Records a read. The expiration instant is left unchanged.
    pub fn touch(&mut self, now: Instant, access_seq: u64) {
        self.last_accessed = now;
        self.access_seq = access_seq;
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` is strictly past its expiration instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => expires < now,
            None => false,
        }
    }

    // == Recency Key ==
    /// Ordering key for LRU selection; smaller means less recently used.
    pub fn recency(&self) -> (Instant, u64) {
        (self.last_accessed, self.access_seq)
    }
}
