//! Subcommand implementations.

pub mod category;
pub mod migrate;
pub mod seed;

use souk_backend::{BackendClient, BackendConfig};

/// Service-role backend client from the environment (`.env` honoured).
///
/// # Errors
///
/// Returns an error if the backend variables or the service key are missing.
pub fn service_client() -> Result<BackendClient, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = BackendConfig::from_env()?;
    Ok(BackendClient::service(&config)?)
}
