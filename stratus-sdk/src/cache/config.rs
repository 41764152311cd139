//! Configuration for the observation cache

use crate::error::{Result, WeatherError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the observation cache
///
/// Defaults follow the provider terms this service targets: at most 10
/// cities per credential, each entry served for at most 10 minutes after
/// its last write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries held at once
    pub max_entries: usize,

    /// Time-to-live, measured from each write
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10,
            ttl: Duration::from_secs(600),
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(WeatherError::Config(
                "cache max_entries must be greater than 0".to_string(),
            ));
        }

        if self.ttl.is_zero() {
            return Err(WeatherError::Config(
                "cache ttl must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    max_entries: Option<usize>,
    ttl: Option<Duration>,
}

impl CacheConfigBuilder {
    /// Set the maximum number of cache entries
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Set the time-to-live for cache entries
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            max_entries: self.max_entries.unwrap_or(defaults.max_entries),
            ttl: self.ttl.unwrap_or(defaults.ttl),
        }
    }
}
