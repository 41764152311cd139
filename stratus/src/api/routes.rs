//! HTTP handlers for the weather API

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use stratus_sdk::{Observation, SdkRegistry, WeatherError};

/// Application state
pub struct AppState {
    /// Per-credential instance registry
    pub registry: SdkRegistry,
    /// Credential the service operates under
    pub api_key: String,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Query parameters naming a city
#[derive(Deserialize)]
pub struct CityQuery {
    pub city: String,
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map an SDK failure onto an HTTP response.
fn error_response(err: WeatherError) -> Response {
    let status = match &err {
        WeatherError::CityNotFound(_) => StatusCode::NOT_FOUND,
        WeatherError::InvalidApiKey => StatusCode::BAD_REQUEST,
        WeatherError::Upstream(_) | WeatherError::Parse(_) => StatusCode::BAD_GATEWAY,
        WeatherError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    error!("Request failed: {}", err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Current weather for a city, cache-first
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CityQuery>,
) -> Response {
    match weather_for(&state, &params.city).await {
        Ok(observation) => Json(observation).into_response(),
        Err(err) => error_response(err),
    }
}

async fn weather_for(state: &AppState, city: &str) -> Result<Observation, WeatherError> {
    let service = state.registry.resolve(&state.api_key).await?;
    service.get_weather(city).await
}

/// Force a fresh fetch for a city, bypassing the cache
pub async fn force_refresh(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CityQuery>,
) -> Response {
    let refreshed = async {
        let service = state.registry.resolve(&state.api_key).await?;
        service.refresh(&params.city).await
    }
    .await;

    match refreshed {
        Ok(observation) => Json(observation).into_response(),
        Err(err) => error_response(err),
    }
}

/// City names currently cached
pub async fn cached_cities(State(state): State<Arc<AppState>>) -> Response {
    match state.registry.resolve(&state.api_key).await {
        Ok(service) => Json(service.cached_cities().await).into_response(),
        Err(err) => error_response(err),
    }
}

/// Tear down the credential's service instance
pub async fn teardown(State(state): State<Arc<AppState>>) -> Response {
    state.registry.destroy(&state.api_key).await;
    StatusCode::NO_CONTENT.into_response()
}
