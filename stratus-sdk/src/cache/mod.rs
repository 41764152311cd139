//! # Bounded, TTL-expiring observation cache
//!
//! City-keyed store shared between the request path and the refresh
//! poller. Entries expire a fixed interval after each write, and
//! recency-based eviction keeps the store within capacity before an
//! insertion can exceed it. Removal observers are logging hooks only and
//! never affect the outcome of a cache operation.
//!
//! ## Example
//!
//! ```no_run
//! use stratus_sdk::cache::{CacheConfig, ObservationCache};
//! use std::time::Duration;
//!
//! # async fn example(observation: stratus_sdk::Observation) {
//! let config = CacheConfig::builder()
//!     .max_entries(10)
//!     .ttl(Duration::from_secs(600))
//!     .build();
//!
//! let cache = ObservationCache::new(config);
//! cache.insert("London".to_string(), observation).await;
//!
//! if let Some(cached) = cache.get("London").await {
//!     println!("{} °C", cached.temperature);
//! }
//! # }
//! ```

pub mod config;
pub mod entry;
pub mod store;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use entry::CacheEntry;
pub use store::ObservationCache;
pub use types::{CacheStats, RemovalCause, RemovalListener};
