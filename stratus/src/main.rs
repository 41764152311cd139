use anyhow::Result;
use clap::Parser;

use stratus::api::ApiServer;
use stratus::config::{Cli, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stratus=info,stratus_sdk=info".into()),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli)?;

    ApiServer::new(config).start().await
}
