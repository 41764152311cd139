//! Error types for weather operations
//!
//! This module defines the error taxonomy shared by the cache, the
//! provider client, and the instance registry.

use thiserror::Error;

/// Main error type for weather operations
#[derive(Error, Debug)]
pub enum WeatherError {
    /// API key was missing or blank at SDK resolution
    #[error("API key must not be empty")]
    InvalidApiKey,

    /// Geocoding produced no match for the requested city
    #[error("city not found: {0}")]
    CityNotFound(String),

    /// Transport-level failure talking to the weather provider
    #[error("weather provider unavailable: {0}")]
    Upstream(String),

    /// Provider returned a payload that could not be decoded
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// Invalid SDK or cache configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for weather operations
pub type Result<T> = std::result::Result<T, WeatherError>;

impl WeatherError {
    /// Whether the failure was caused by the caller's input rather than
    /// the provider or the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            WeatherError::InvalidApiKey | WeatherError::CityNotFound(_)
        )
    }
}
