//! Per-credential weather service
//!
//! The bundle of provider client, observation cache, and optional refresh
//! poller created by the registry for each API key, plus the
//! fetch-and-store pipeline shared by the cache-miss path, force refresh,
//! and the poller.

use crate::cache::{CacheStats, ObservationCache, RemovalCause};
use crate::client::ProviderClient;
use crate::config::{Mode, SdkConfig};
use crate::error::{Result, WeatherError};
use crate::model::Observation;
use crate::poller::RefreshPoller;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Weather lookups for one API key, cache-first.
pub struct WeatherService {
    client: ProviderClient,
    cache: ObservationCache,
    poller: Mutex<Option<RefreshPoller>>,
}

impl WeatherService {
    /// Build a service instance for one API key.
    ///
    /// Fails with [`WeatherError::InvalidApiKey`] before any cache or
    /// poller is created when the key is blank. In [`Mode::Polling`] the
    /// refresh poller is started immediately, so construction must happen
    /// within a Tokio runtime.
    pub fn new(config: &SdkConfig, http: reqwest::Client, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(WeatherError::InvalidApiKey);
        }

        let client = ProviderClient::new(
            http,
            config.geo_url.clone(),
            config.weather_url.clone(),
            api_key,
        );
        let cache = ObservationCache::with_removal_listener(
            config.cache.clone(),
            Arc::new(|city: &str, cause: RemovalCause| {
                debug!("Removed from cache: {} due to {}", city, cause);
            }),
        );

        let poller = match config.mode {
            Mode::Polling => Some(RefreshPoller::start(
                client.clone(),
                cache.clone(),
                config.refresh_interval,
                config.stop_grace,
            )),
            Mode::OnDemand => None,
        };

        info!("Weather service initialized (mode: {:?})", config.mode);

        Ok(Self {
            client,
            cache,
            poller: Mutex::new(poller),
        })
    }

    /// Get weather for a city, serving from the cache when a live entry
    /// exists and fetching otherwise.
    pub async fn get_weather(&self, city: &str) -> Result<Observation> {
        let city = city.trim();

        if let Some(observation) = self.cache.get(city).await {
            return Ok(observation);
        }

        fetch_and_store(&self.client, &self.cache, city).await
    }

    /// Fetch fresh data for a city, bypassing the cache.
    pub async fn refresh(&self, city: &str) -> Result<Observation> {
        fetch_and_store(&self.client, &self.cache, city.trim()).await
    }

    /// City names currently held in the cache.
    pub async fn cached_cities(&self) -> Vec<String> {
        self.cache.keys().await
    }

    /// Statistics for this instance's cache.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Stop the poller, waiting up to the configured grace period, and
    /// clear the cache. Safe to call more than once, and a no-op for the
    /// poller when the service runs on demand.
    pub async fn shutdown(&self) {
        if let Some(poller) = self.poller.lock().await.take() {
            poller.stop().await;
        }
        self.cache.invalidate_all().await;
    }
}

/// Two-stage fetch shared by the cache-miss path, force refresh, and the
/// poller: geocode the city, fetch its observation, and store the result
/// under the caller's (trimmed) key — not the geocoder's canonical name,
/// so repeated lookups of the same caller-provided string hit the cache.
///
/// Any failure aborts without touching the cache; a previously cached
/// value stays until its own TTL lapses.
pub(crate) async fn fetch_and_store(
    client: &ProviderClient,
    cache: &ObservationCache,
    city: &str,
) -> Result<Observation> {
    let location = client.geocode(city).await?;
    let observation = client.fetch_observation(&location).await?;
    cache.insert(city.to_string(), observation.clone()).await;
    Ok(observation)
}
