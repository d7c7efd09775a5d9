//! Core types for Souk.
//!
//! This module provides type-safe wrappers and the entity shapes shared by
//! the storefront, the admin panel and the backend client.

pub mod brand;
pub mod bundle;
pub mod category;
pub mod id;
pub mod order;
pub mod price;
pub mod shipping;
pub mod wilaya;

pub use brand::BrandSettings;
pub use bundle::{BundleItem, BundleOffer, SelectedBundle};
pub use category::{Category, CategoryError, NewCategory};
pub use id::*;
pub use order::Order;
pub use price::Dzd;
pub use shipping::{ShippingRates, ShippingZone};
pub use wilaya::{WilayaCode, WilayaCodeError};
