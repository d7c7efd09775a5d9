//! Bundle offers ("buy 2, pay less") selected on a product page.
//!
//! These are plain values carried from the product page to checkout. The
//! chosen tier fixes both how many items the customer picks and the price
//! paid for all of them together.

use serde::{Deserialize, Serialize};

use super::price::Dzd;

/// A quantity/price tier offered for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleOffer {
    pub quantity: u32,
    pub price: Dzd,
}

/// One item of a bundle with its chosen variant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BundleItem {
    #[serde(default)]
    pub variant_id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A tier together with the variants chosen for each of its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedBundle {
    pub offer: BundleOffer,
    pub items: Vec<BundleItem>,
}

impl SelectedBundle {
    /// Price of the whole bundle (the tier price, not per item).
    #[must_use]
    pub const fn total(&self) -> Dzd {
        self.offer.price
    }

    /// Whether a variant was picked for every item in the tier.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        u32::try_from(self.items.len()).is_ok_and(|n| n == self.offer.quantity)
    }
}
