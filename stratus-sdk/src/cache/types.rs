//! Shared types for the observation cache

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Why an entry left the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalCause {
    /// Entry outlived its TTL
    Expired,

    /// Evicted to keep the cache within capacity
    Capacity,

    /// Overwritten by a newer observation for the same city
    Replaced,

    /// Removed by `invalidate_all`
    Invalidated,
}

impl fmt::Display for RemovalCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalCause::Expired => write!(f, "TTL expired"),
            RemovalCause::Capacity => write!(f, "capacity eviction"),
            RemovalCause::Replaced => write!(f, "replacement"),
            RemovalCause::Invalidated => write!(f, "invalidation"),
        }
    }
}

/// Observer invoked after an entry has been removed, for logging only.
///
/// Listeners run after the store lock has been released and their return
/// value is ignored, so they cannot block or fail a cache operation.
pub type RemovalListener = Arc<dyn Fn(&str, RemovalCause) + Send + Sync>;

/// Counters describing cache behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Total number of cache hits
    pub hits: u64,

    /// Total number of cache misses
    pub misses: u64,

    /// Total number of writes, both inserts and replacements
    pub insertions: u64,

    /// Entries evicted to stay within capacity
    pub evictions_capacity: u64,

    /// Entries purged because their TTL elapsed
    pub evictions_ttl: u64,

    /// Entries removed by `invalidate_all`
    pub invalidations: u64,
}

impl CacheStats {
    /// Cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ hits: {}, misses: {}, hit_rate: {:.2}%, insertions: {}, evictions: {} }}",
            self.hits,
            self.misses,
            self.hit_rate(),
            self.insertions,
            self.evictions_capacity + self.evictions_ttl
        )
    }
}
