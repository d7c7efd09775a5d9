//! Souk Core - Shared domain types and store ports.
//!
//! This crate provides the types used across all Souk components:
//! - `backend` - REST client for the hosted backend (database + auth)
//! - `storefront` - Public-facing Arabic storefront
//! - `admin` - Administration panel
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! Persistence lives behind the store ports in [`store`]; the backend crate
//! implements them over the network and [`testing`] implements them in memory.
//!
//! # Modules
//!
//! - [`types`] - Ids, prices, wilaya codes and the catalog/order/shipping entities
//! - [`store`] - Store ports, session resolution and [`StoreError`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

pub use store::*;
pub use types::*;
