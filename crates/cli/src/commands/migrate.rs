//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! souk-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string of the backend database
//!
//! Migrations live in `crates/cli/migrations/` and are embedded at build
//! time. They create the `categories`, `orders`, `shipping_zones` and
//! `brand_settings` tables plus the `admin.session` table used by the admin
//! panel's session store.

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run every pending migration.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset, the database is unreachable
/// or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url.expose_secret())
        .await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
