//! Per-credential instance registry

use crate::config::SdkConfig;
use crate::error::{Result, WeatherError};
use crate::service::WeatherService;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Registry of weather service instances, one per API key.
///
/// Instances are created lazily on first resolution and live until
/// explicitly destroyed. The registry owns a single HTTP client whose
/// connection pool is shared by every instance. It is an explicitly
/// constructed object — create one and hand it (behind an [`Arc`]) to
/// whatever layer serves requests; there is no global state.
pub struct SdkRegistry {
    config: SdkConfig,
    http: reqwest::Client,
    instances: RwLock<HashMap<String, Arc<WeatherService>>>,
}

impl SdkRegistry {
    /// Validate the configuration and build the shared HTTP client.
    pub fn new(config: SdkConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| WeatherError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http,
            instances: RwLock::new(HashMap::new()),
        })
    }

    /// Return the service instance for an API key, constructing it on
    /// first use.
    ///
    /// Concurrent calls with the same key observe the same instance;
    /// exactly one construction happens. A blank key fails with
    /// [`WeatherError::InvalidApiKey`] and leaves nothing behind.
    pub async fn resolve(&self, api_key: &str) -> Result<Arc<WeatherService>> {
        if api_key.trim().is_empty() {
            return Err(WeatherError::InvalidApiKey);
        }

        if let Some(service) = self.instances.read().await.get(api_key) {
            return Ok(Arc::clone(service));
        }

        // Construction happens under the write lock so racing resolvers
        // cannot build a second instance for the same key.
        let mut instances = self.instances.write().await;
        if let Some(service) = instances.get(api_key) {
            return Ok(Arc::clone(service));
        }

        debug!("Creating weather service instance for new API key");
        let service = Arc::new(WeatherService::new(&self.config, self.http.clone(), api_key)?);
        instances.insert(api_key.to_string(), Arc::clone(&service));

        Ok(service)
    }

    /// Tear down the instance for an API key: stop its poller, waiting up
    /// to the configured grace period, and clear its cache.
    ///
    /// Returns false when no instance existed; that is not an error. A
    /// later [`resolve`](Self::resolve) for the same key constructs a
    /// brand-new instance.
    pub async fn destroy(&self, api_key: &str) -> bool {
        let removed = self.instances.write().await.remove(api_key);

        match removed {
            Some(service) => {
                info!("Destroying weather service instance");
                service.shutdown().await;
                true
            }
            None => false,
        }
    }

    /// Number of live instances.
    pub async fn len(&self) -> usize {
        self.instances.read().await.len()
    }

    /// Whether the registry holds no instances.
    pub async fn is_empty(&self) -> bool {
        self.instances.read().await.is_empty()
    }
}
