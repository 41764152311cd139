//! SDK configuration

use crate::cache::CacheConfig;
use crate::error::{Result, WeatherError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Default geocoding endpoint
pub const DEFAULT_GEO_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

/// Default current-weather endpoint
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Operating mode for a weather service instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Fetch only on cache misses
    #[default]
    OnDemand,

    /// Additionally refresh every cached city on a fixed cadence
    Polling,
}

impl FromStr for Mode {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on_demand" | "on-demand" | "ondemand" => Ok(Mode::OnDemand),
            "polling" => Ok(Mode::Polling),
            other => Err(WeatherError::Config(format!(
                "mode must be one of: on_demand, polling (got \"{other}\")"
            ))),
        }
    }
}

/// Configuration shared by every per-credential service instance
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Operating mode
    pub mode: Mode,

    /// Geocoding endpoint base URL
    pub geo_url: String,

    /// Current-weather endpoint base URL
    pub weather_url: String,

    /// Timeout applied to each provider request
    pub http_timeout: Duration,

    /// Cache capacity and expiry settings
    pub cache: CacheConfig,

    /// Interval between poller firings in polling mode
    pub refresh_interval: Duration,

    /// How long `shutdown` waits for an in-flight firing before aborting it
    pub stop_grace: Duration,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            mode: Mode::OnDemand,
            geo_url: DEFAULT_GEO_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            cache: CacheConfig::default(),
            refresh_interval: Duration::from_secs(600),
            stop_grace: Duration::from_secs(60),
        }
    }
}

impl SdkConfig {
    /// Create a new builder for SDK configuration
    pub fn builder() -> SdkConfigBuilder {
        SdkConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.cache.validate()?;

        if self.geo_url.trim().is_empty() {
            return Err(WeatherError::Config(
                "geo_url must not be empty".to_string(),
            ));
        }

        if self.weather_url.trim().is_empty() {
            return Err(WeatherError::Config(
                "weather_url must not be empty".to_string(),
            ));
        }

        if self.http_timeout.is_zero() {
            return Err(WeatherError::Config(
                "http_timeout must be greater than 0".to_string(),
            ));
        }

        if self.refresh_interval.is_zero() {
            return Err(WeatherError::Config(
                "refresh_interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for SDK configuration
#[derive(Debug, Default)]
pub struct SdkConfigBuilder {
    mode: Option<Mode>,
    geo_url: Option<String>,
    weather_url: Option<String>,
    http_timeout: Option<Duration>,
    cache: Option<CacheConfig>,
    refresh_interval: Option<Duration>,
    stop_grace: Option<Duration>,
}

impl SdkConfigBuilder {
    /// Set the operating mode
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the geocoding endpoint base URL
    pub fn geo_url(mut self, url: impl Into<String>) -> Self {
        self.geo_url = Some(url.into());
        self
    }

    /// Set the current-weather endpoint base URL
    pub fn weather_url(mut self, url: impl Into<String>) -> Self {
        self.weather_url = Some(url.into());
        self
    }

    /// Set the per-request HTTP timeout
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Set the cache configuration
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the poller firing interval
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// Set the shutdown grace period for in-flight firings
    pub fn stop_grace(mut self, grace: Duration) -> Self {
        self.stop_grace = Some(grace);
        self
    }

    /// Build the SDK configuration
    pub fn build(self) -> SdkConfig {
        let defaults = SdkConfig::default();

        SdkConfig {
            mode: self.mode.unwrap_or(defaults.mode),
            geo_url: self.geo_url.unwrap_or(defaults.geo_url),
            weather_url: self.weather_url.unwrap_or(defaults.weather_url),
            http_timeout: self.http_timeout.unwrap_or(defaults.http_timeout),
            cache: self.cache.unwrap_or(defaults.cache),
            refresh_interval: self.refresh_interval.unwrap_or(defaults.refresh_interval),
            stop_grace: self.stop_grace.unwrap_or(defaults.stop_grace),
        }
    }
}
