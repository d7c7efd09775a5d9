//! Business logic services for admin.
//!
//! - `loaders` - Page data for the orders, shipping zones and brand pages

pub mod loaders;

pub use loaders::{load_brand_settings, load_orders, load_shipping_zones};
