//! REST API for the weather service

pub mod routes;
pub mod server;

pub use routes::AppState;
pub use server::ApiServer;
