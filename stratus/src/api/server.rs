//! API server for the weather service

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use stratus_sdk::SdkRegistry;

use super::routes::{self, AppState};
use crate::config::ServerConfig;

/// REST server exposing the weather SDK
pub struct ApiServer {
    config: ServerConfig,
}

impl ApiServer {
    /// Create a new API server with configuration
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Build the registry and serve until the process exits.
    pub async fn start(self) -> Result<()> {
        let registry = SdkRegistry::new(self.config.sdk.clone())?;
        let state = Arc::new(AppState {
            registry,
            api_key: self.config.api_key.clone(),
        });

        let app = Self::router(state);

        let addr = format!("{}:{}", self.config.host, self.config.port);
        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Router construction, separate from `start` so tests can drive the
    /// API without binding a fixed port.
    pub fn router(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/health", get(routes::health))
            .route(
                "/weather",
                get(routes::get_weather).delete(routes::teardown),
            )
            .route("/weather/cities", get(routes::cached_cities))
            .route("/weather/refresh", post(routes::force_refresh))
            .with_state(state)
            .layer(CorsLayer::permissive())
    }
}
