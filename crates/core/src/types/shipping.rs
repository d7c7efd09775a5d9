//! Shipping zones and delivery rates.

use serde::{Deserialize, Serialize};

use super::price::Dzd;
use super::wilaya::WilayaCode;

/// Delivery prices for one wilaya.
///
/// `home_delivery_price` is delivery to the customer's address,
/// `desk_delivery_price` is pickup at the carrier's desk (stop-desk).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShippingRates {
    pub home_delivery_price: Dzd,
    pub desk_delivery_price: Dzd,
}

impl ShippingRates {
    /// Both prices zero. Shown when a wilaya has no configured zone.
    pub const ZERO: Self = Self {
        home_delivery_price: Dzd::ZERO,
        desk_delivery_price: Dzd::ZERO,
    };
}

/// A row of the `shipping_zones` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingZone {
    pub wilaya_code: WilayaCode,
    pub home_delivery_price: Dzd,
    pub desk_delivery_price: Dzd,
}

impl ShippingZone {
    /// The delivery prices of this zone.
    #[must_use]
    pub const fn rates(&self) -> ShippingRates {
        ShippingRates {
            home_delivery_price: self.home_delivery_price,
            desk_delivery_price: self.desk_delivery_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_ignores_extra_columns() {
        let zone: ShippingZone = serde_json::from_value(serde_json::json!({
            "id": 4,
            "wilaya_code": 16,
            "home_delivery_price": 500,
            "desk_delivery_price": 300,
            "updated_at": "2026-02-01T00:00:00+00:00"
        }))
        .unwrap();

        assert_eq!(zone.wilaya_code, WilayaCode::new(16));
        assert_eq!(
            zone.rates(),
            ShippingRates {
                home_delivery_price: Dzd::from_dinar(500),
                desk_delivery_price: Dzd::from_dinar(300),
            }
        );
    }

    #[test]
    fn test_zero_rates_serialize_as_numbers() {
        let json = serde_json::to_value(ShippingRates::ZERO).unwrap();
        assert_eq!(json["home_delivery_price"].as_f64(), Some(0.0));
        assert_eq!(json["desk_delivery_price"].as_f64(), Some(0.0));
    }
}
