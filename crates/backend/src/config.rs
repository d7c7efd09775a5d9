//! Backend connection settings loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SUPABASE_URL` - Project URL (e.g., `https://abcd.supabase.co`)
//! - `SUPABASE_ANON_KEY` - Public anon key (row-level security applies)
//!
//! ## Optional
//! - `SUPABASE_SERVICE_ROLE_KEY` - Service-role key (bypasses row-level
//!   security; only the CLI needs it)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Connection settings for the hosted backend.
///
/// Implements `Debug` manually to redact the keys.
#[derive(Clone)]
pub struct BackendConfig {
    /// Project base URL
    pub url: Url,
    /// Public anon key
    pub anon_key: SecretString,
    /// Service-role key (HIGH PRIVILEGE)
    pub service_role_key: Option<SecretString>,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url.as_str())
            .field("anon_key", &"[REDACTED]")
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl BackendConfig {
    /// Load backend settings from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or the URL
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let url = parse_base_url(&get_required_env("SUPABASE_URL")?)?;
        let anon_key = SecretString::from(get_required_env("SUPABASE_ANON_KEY")?);
        let service_role_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY")
            .ok()
            .map(SecretString::from);

        Ok(Self {
            url,
            anon_key,
            service_role_key,
        })
    }
}

/// Parse the project URL, requiring http(s).
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unparsable or non-http URLs.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("SUPABASE_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "SUPABASE_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}
