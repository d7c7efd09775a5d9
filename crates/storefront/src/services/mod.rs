//! Business logic services for storefront.

pub mod shipping_rates;

pub use shipping_rates::{ShippingRateTracker, ShippingRatesState, lookup_shipping_rates};
