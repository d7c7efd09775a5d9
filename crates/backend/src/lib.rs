//! Souk Backend - client for the hosted backend.
//!
//! The backend is a managed Postgres exposed through a PostgREST-style REST
//! API (`/rest/v1`) with a GoTrue-style auth API (`/auth/v1`) in front of it.
//! Storefront, admin and CLI never talk SQL to it directly; they go through
//! the store ports from `souk-core`, which [`BackendClient`] implements.
//!
//! # Request contexts
//!
//! A client is always bound to one of three contexts:
//!
//! - **server** ([`BackendClient::new`]) - anon key, anonymous reads
//! - **session** ([`BackendClient::with_session`]) - anon key plus the
//!   signed-in user's access token, so row-level security applies
//! - **service** ([`BackendClient::service`]) - service-role key, CLI only
//!
//! # Example
//!
//! ```rust,ignore
//! use souk_backend::{BackendClient, BackendConfig};
//! use souk_core::ShippingZoneStore;
//!
//! let client = BackendClient::new(&BackendConfig::from_env()?)?;
//! let zone = client.shipping_zone(WilayaCode::new(16)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod auth;
mod client;
pub mod config;
mod error;
mod rest;
mod stores;

pub use client::BackendClient;
pub use config::{BackendConfig, ConfigError};
pub use error::BackendError;
