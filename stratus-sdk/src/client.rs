//! HTTP client for the two-stage provider lookup
//!
//! Stage one resolves a city name to coordinates via the geocoding
//! endpoint; stage two fetches the current observation for those
//! coordinates. Bodies are read as text and decoded separately so
//! transport failures and malformed payloads map to distinct errors.

use crate::error::{Result, WeatherError};
use crate::model::{CurrentWeatherPayload, Location, Observation};
use tracing::debug;

/// Client for the provider's geocoding and current-weather endpoints.
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    geo_url: String,
    weather_url: String,
    api_key: String,
}

impl ProviderClient {
    /// Create a client bound to one API key, reusing an existing HTTP
    /// client's connection pool.
    pub fn new(
        http: reqwest::Client,
        geo_url: impl Into<String>,
        weather_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            geo_url: geo_url.into(),
            weather_url: weather_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Resolve a city name to coordinates.
    ///
    /// An empty result set means the provider knows no such city.
    pub async fn geocode(&self, city: &str) -> Result<Location> {
        let response = self
            .http
            .get(&self.geo_url)
            .query(&[("q", city), ("limit", "1"), ("appid", &self.api_key)])
            .send()
            .await
            .map_err(|e| WeatherError::Upstream(format!("error accessing geocoding API: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream(format!(
                "geocoding API returned {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Upstream(format!("error reading geocoding response: {e}")))?;
        debug!("Geocoding response for {}: {}", city, body);

        let locations: Vec<Location> = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("bad geocoding payload: {e}")))?;

        locations
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))
    }

    /// Fetch the current observation for resolved coordinates, in metric
    /// units.
    pub async fn fetch_observation(&self, location: &Location) -> Result<Observation> {
        let response = self
            .http
            .get(&self.weather_url)
            .query(&[
                ("lat", location.lat.to_string()),
                ("lon", location.lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Upstream(format!("error accessing weather API: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream(format!(
                "weather API returned {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Upstream(format!("error reading weather response: {e}")))?;
        debug!("Weather response for {}: {}", location.name, body);

        let payload: CurrentWeatherPayload = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("bad weather payload: {e}")))?;

        Ok(Observation::from(payload))
    }
}
