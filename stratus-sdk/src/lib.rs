//! # stratus-sdk
//!
//! Per-credential weather SDK: a bounded, TTL-expiring cache of city
//! observations, an optional background poller that keeps cached entries
//! warm, and a registry multiplexing independent instances by API key.
//!
//! ## Features
//!
//! - Two-stage provider lookup (city → coordinates → observation)
//! - Cache-first reads with write-based expiry and capacity eviction
//! - Optional polling mode refreshing every cached city on a fixed cadence
//! - One isolated service instance per API key, torn down on demand
//! - Per-city failure isolation during background refreshes
//!
//! ## On-demand lookups
//!
//! ```no_run
//! use stratus_sdk::{SdkConfig, SdkRegistry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = SdkRegistry::new(SdkConfig::default())?;
//!
//!     let service = registry.resolve("my-api-key").await?;
//!     let observation = service.get_weather("London").await?;
//!     println!(
//!         "{} °C in {}",
//!         observation.temperature, observation.location_name
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Polling mode
//!
//! In polling mode each instance spawns a background task that refreshes
//! every cached city on a fixed cadence, so repeat callers never pay for a
//! cache miss. `destroy` stops the poller and clears the cache.
//!
//! ```no_run
//! use std::time::Duration;
//! use stratus_sdk::{Mode, SdkConfig, SdkRegistry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SdkConfig::builder()
//!         .mode(Mode::Polling)
//!         .refresh_interval(Duration::from_secs(600))
//!         .build();
//!     let registry = SdkRegistry::new(config)?;
//!
//!     let service = registry.resolve("my-api-key").await?;
//!     service.get_weather("London").await?;
//!
//!     // ... the poller now keeps "London" fresh ...
//!
//!     registry.destroy("my-api-key").await;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod poller;
pub mod registry;
pub mod service;

// Re-export main types for convenience
pub use cache::{
    CacheConfig, CacheConfigBuilder, CacheEntry, CacheStats, ObservationCache, RemovalCause,
    RemovalListener,
};
pub use client::ProviderClient;
pub use config::{Mode, SdkConfig, SdkConfigBuilder, DEFAULT_GEO_URL, DEFAULT_WEATHER_URL};
pub use error::{Result, WeatherError};
pub use model::{Location, Observation};
pub use poller::RefreshPoller;
pub use registry::SdkRegistry;
pub use service::WeatherService;
