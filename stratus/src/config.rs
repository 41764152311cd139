//! Process configuration: defaults, environment overrides, CLI flags.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::time::Duration;
use stratus_sdk::{Mode, SdkConfig};

/// Weather observation REST service
#[derive(Parser, Debug)]
#[command(name = "stratus", about = "Weather observation REST service")]
pub struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Operating mode: on_demand or polling
    #[arg(long)]
    pub mode: Option<String>,

    /// OpenWeather API key (falls back to OPENWEATHER_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub sdk: SdkConfig,
}

fn env_secs(name: &str) -> Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{name} must be an integer number of seconds"))?;
            if secs == 0 {
                bail!("{name} must be greater than 0");
            }
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}

impl ServerConfig {
    /// Merge defaults, environment variables, and CLI flags, then
    /// validate. CLI flags win over the environment.
    pub fn load(cli: Cli) -> Result<Self> {
        let mut sdk = SdkConfig::default();

        if let Ok(url) = std::env::var("STRATUS_GEO_URL") {
            sdk.geo_url = url;
        }
        if let Ok(url) = std::env::var("STRATUS_WEATHER_URL") {
            sdk.weather_url = url;
        }
        if let Ok(raw) = std::env::var("STRATUS_CACHE_CAPACITY") {
            let capacity = raw
                .trim()
                .parse()
                .context("STRATUS_CACHE_CAPACITY must be an integer greater than 0")?;
            sdk.cache.max_entries = capacity;
        }
        if let Some(ttl) = env_secs("STRATUS_CACHE_TTL_SECS")? {
            sdk.cache.ttl = ttl;
        }
        if let Some(interval) = env_secs("STRATUS_REFRESH_INTERVAL_SECS")? {
            sdk.refresh_interval = interval;
        }
        if let Some(grace) = env_secs("STRATUS_STOP_GRACE_SECS")? {
            sdk.stop_grace = grace;
        }

        let mode_raw = cli.mode.or_else(|| std::env::var("STRATUS_MODE").ok());
        if let Some(raw) = mode_raw {
            sdk.mode = raw.parse::<Mode>()?;
        }

        let api_key = cli
            .api_key
            .or_else(|| std::env::var("OPENWEATHER_API_KEY").ok())
            .unwrap_or_default();
        if api_key.trim().is_empty() {
            bail!("API key is required: pass --api-key or set OPENWEATHER_API_KEY");
        }

        sdk.validate()?;

        Ok(Self {
            host: cli.host,
            port: cli.port,
            api_key,
            sdk,
        })
    }
}
