//! Algerian dinar amounts.
//!
//! The backend stores prices as `numeric` columns and returns them as JSON
//! numbers, so [`Dzd`] (de)serializes through `rust_decimal`'s float codec
//! while keeping decimal arithmetic in memory.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount in Algerian dinar (DZD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dzd(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Dzd {
    /// Zero dinar.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Currency suffix used when displaying amounts.
    pub const SYMBOL: &'static str = "د.ج";

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from whole dinar.
    #[must_use]
    pub fn from_dinar(dinar: i64) -> Self {
        Self(Decimal::from(dinar))
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Dzd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.normalize(), Self::SYMBOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_json_numbers() {
        let whole: Dzd = serde_json::from_str("600").unwrap();
        assert_eq!(whole, Dzd::from_dinar(600));

        let fractional: Dzd = serde_json::from_str("450.5").unwrap();
        assert_eq!(fractional.amount(), Decimal::new(4505, 1));
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_value(Dzd::from_dinar(800)).unwrap();
        assert!(json.is_number());
        assert_eq!(json.as_f64(), Some(800.0));
    }

    #[test]
    fn test_display_appends_symbol_without_trailing_zeros() {
        let price = Dzd::new(Decimal::new(70000, 2));
        assert_eq!(price.to_string(), "700 د.ج");
    }

    #[test]
    fn test_zero() {
        assert_eq!(Dzd::default(), Dzd::ZERO);
        assert_eq!(Dzd::ZERO.to_string(), "0 د.ج");
    }
}
