//! Weather observation REST service over the stratus SDK.

pub mod api;
pub mod config;

pub use api::ApiServer;
pub use config::{Cli, ServerConfig};
