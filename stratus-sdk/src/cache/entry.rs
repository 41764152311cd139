//! Cache entry bookkeeping with write-based expiry

use crate::model::Observation;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// A cached observation together with its write and expiry instants.
///
/// Expiry is fixed when the entry is written; reads never extend it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached observation
    pub observation: Observation,

    /// When the entry was written
    pub inserted_at: DateTime<Utc>,

    /// When the entry stops being served, derived from the cache TTL
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry expiring `ttl` from now.
    pub fn new(observation: Observation, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now
            + chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::seconds(600));

        Self {
            observation,
            inserted_at: now,
            expires_at,
        }
    }

    /// Whether the TTL has elapsed since the entry was written.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Time elapsed since the entry was written.
    pub fn age(&self) -> Duration {
        (Utc::now() - self.inserted_at)
            .to_std()
            .unwrap_or(Duration::from_secs(0))
    }
}
