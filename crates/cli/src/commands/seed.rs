//! Seed shipping zones from a YAML file.
//!
//! The file is a list of zones:
//!
//! ```yaml
//! - wilaya_code: 16
//!   home_delivery_price: 400
//!   desk_delivery_price: 250
//! - wilaya_code: 31
//!   home_delivery_price: 700
//!   desk_delivery_price: 450
//! ```
//!
//! The whole file is validated before anything is written; zones are then
//! upserted one by one on `wilaya_code`.

use std::collections::BTreeSet;
use std::path::Path;

use souk_core::{ShippingZone, ShippingZoneStore, StoreError};
use thiserror::Error;
use tracing::{error, info};

/// Problems found in a zones file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZoneFileError {
    #[error("invalid YAML: {0}")]
    Yaml(String),

    #[error("file contains no zones")]
    Empty,

    #[error("wilaya {0} is not a known wilaya code")]
    UnknownWilaya(i32),

    #[error("wilaya {0} appears more than once")]
    Duplicate(i32),

    #[error("wilaya {0} has a negative price")]
    NegativePrice(i32),
}

/// Outcome of a seeding run.
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub upserted: usize,
    pub errors: Vec<(i32, StoreError)>,
}

/// Parse and validate a zones file.
///
/// # Errors
///
/// Returns the first problem found; nothing is partially accepted.
pub fn parse_zones(content: &str) -> Result<Vec<ShippingZone>, ZoneFileError> {
    let zones: Vec<ShippingZone> =
        serde_yaml::from_str(content).map_err(|e| ZoneFileError::Yaml(e.to_string()))?;
    if zones.is_empty() {
        return Err(ZoneFileError::Empty);
    }

    let mut seen = BTreeSet::new();
    for zone in &zones {
        let code = zone.wilaya_code.as_i32();
        if !zone.wilaya_code.is_known() {
            return Err(ZoneFileError::UnknownWilaya(code));
        }
        if !seen.insert(code) {
            return Err(ZoneFileError::Duplicate(code));
        }
        if zone.home_delivery_price.amount().is_sign_negative()
            || zone.desk_delivery_price.amount().is_sign_negative()
        {
            return Err(ZoneFileError::NegativePrice(code));
        }
    }
    Ok(zones)
}

/// Upsert every zone, carrying on past individual failures.
pub async fn seed_zones(store: &dyn ShippingZoneStore, zones: &[ShippingZone]) -> SeedSummary {
    let mut summary = SeedSummary::default();
    for zone in zones {
        match store.upsert_shipping_zone(zone).await {
            Ok(_) => summary.upserted += 1,
            Err(e) => summary.errors.push((zone.wilaya_code.as_i32(), e)),
        }
    }
    summary
}

/// `souk-cli seed shipping-zones -f <file>`.
///
/// # Errors
///
/// Returns an error if the file is missing or invalid, the backend is not
/// configured, or any upsert failed.
pub async fn shipping_zones(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading shipping zones from file");
    let content = tokio::fs::read_to_string(path).await?;
    let zones = parse_zones(&content)?;
    info!(zones = zones.len(), "Zones validated");

    let client = super::service_client()?;
    let summary = seed_zones(&client, &zones).await;

    info!("Seeding complete!");
    info!("  Zones upserted: {}", summary.upserted);
    if !summary.errors.is_empty() {
        error!("  Errors: {}", summary.errors.len());
        for (code, err) in &summary.errors {
            error!("    - wilaya {code}: {err}");
        }
        return Err(format!("{} zones failed", summary.errors.len()).into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use souk_core::testing::{Failures, MemoryBackend};
    use souk_core::{Dzd, WilayaCode};

    use super::*;

    const ZONES: &str = "
- wilaya_code: 16
  home_delivery_price: 400
  desk_delivery_price: 250
- wilaya_code: 31
  home_delivery_price: 700.5
  desk_delivery_price: 450
";

    #[test]
    fn test_parse_zones() {
        let zones = parse_zones(ZONES).unwrap();

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].wilaya_code, WilayaCode::new(16));
        assert_eq!(zones[0].home_delivery_price, Dzd::from_dinar(400));
        assert_eq!(zones[1].wilaya_code, WilayaCode::new(31));
    }

    #[test]
    fn test_parse_zones_rejects_bad_files() {
        assert_eq!(parse_zones("[]"), Err(ZoneFileError::Empty));
        assert!(matches!(parse_zones("wilaya: 16"), Err(ZoneFileError::Yaml(_))));

        let unknown = "- {wilaya_code: 99, home_delivery_price: 1, desk_delivery_price: 1}";
        assert_eq!(parse_zones(unknown), Err(ZoneFileError::UnknownWilaya(99)));

        let duplicate = "
- {wilaya_code: 16, home_delivery_price: 1, desk_delivery_price: 1}
- {wilaya_code: 16, home_delivery_price: 2, desk_delivery_price: 2}
";
        assert_eq!(parse_zones(duplicate), Err(ZoneFileError::Duplicate(16)));

        let negative = "- {wilaya_code: 5, home_delivery_price: -1, desk_delivery_price: 0}";
        assert_eq!(parse_zones(negative), Err(ZoneFileError::NegativePrice(5)));
    }

    #[tokio::test]
    async fn test_seed_zones_upserts_each_zone() {
        let backend = MemoryBackend::new();
        let zones = parse_zones(ZONES).unwrap();

        let summary = seed_zones(&backend, &zones).await;

        assert_eq!(summary.upserted, 2);
        assert!(summary.errors.is_empty());
        let stored = backend.list_shipping_zones().await.unwrap();
        assert_eq!(stored, zones);
    }

    #[tokio::test]
    async fn test_seed_zones_reports_failures() {
        let backend = MemoryBackend::new().failing(Failures {
            shipping_zones: Some(StoreError::Unauthorized),
            ..Failures::default()
        });
        let zones = parse_zones(ZONES).unwrap();

        let summary = seed_zones(&backend, &zones).await;

        assert_eq!(summary.upserted, 0);
        assert_eq!(summary.errors.len(), 2);
        assert_eq!(summary.errors[0].0, 16);
    }
}
