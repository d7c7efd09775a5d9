//! Store port implementations over the REST API.

use async_trait::async_trait;
use serde::Serialize;
use souk_core::{
    BrandSettings, BrandSettingsStore, Category, CategoryStore, NewCategory, Order,
    OrderStore, ShippingZone, ShippingZoneStore, StoreError, WilayaCode,
};

use crate::client::BackendClient;
use crate::rest::Query;

const CATEGORIES: &str = "categories";
const ORDERS: &str = "orders";
const SHIPPING_ZONES: &str = "shipping_zones";
const BRAND_SETTINGS: &str = "brand_settings";

#[derive(Serialize)]
struct CategoryRow<'a> {
    name: &'a str,
    slug: &'a str,
}

#[async_trait]
impl CategoryStore for BackendClient {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let query = Query::new().select("*").order("name", true);
        Ok(self.select_rows(CATEGORIES, &query).await?)
    }

    async fn insert_category(&self, category: &NewCategory) -> Result<Category, StoreError> {
        let row = CategoryRow {
            name: category.name(),
            slug: category.slug(),
        };
        Ok(self.insert_single(CATEGORIES, &row).await?)
    }
}

#[async_trait]
impl OrderStore for BackendClient {
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let query = Query::new().select("*").order("created_at", false);
        Ok(self.select_rows(ORDERS, &query).await?)
    }
}

#[async_trait]
impl ShippingZoneStore for BackendClient {
    async fn list_shipping_zones(&self) -> Result<Vec<ShippingZone>, StoreError> {
        let query = Query::new().select("*").order("wilaya_code", true);
        Ok(self.select_rows(SHIPPING_ZONES, &query).await?)
    }

    async fn shipping_zone(&self, wilaya: WilayaCode) -> Result<ShippingZone, StoreError> {
        let query = Query::new()
            .select("wilaya_code,home_delivery_price,desk_delivery_price")
            .eq("wilaya_code", wilaya.as_i32());
        Ok(self.select_single(SHIPPING_ZONES, &query).await?)
    }

    async fn upsert_shipping_zone(&self, zone: &ShippingZone) -> Result<ShippingZone, StoreError> {
        Ok(self
            .upsert_single(SHIPPING_ZONES, zone, "wilaya_code")
            .await?)
    }
}

#[async_trait]
impl BrandSettingsStore for BackendClient {
    async fn brand_settings(&self) -> Result<BrandSettings, StoreError> {
        let query = Query::new().select("*");
        Ok(self.select_single(BRAND_SETTINGS, &query).await?)
    }
}
