//! Shipping zones page and table fragment.

use askama::Template;
use askama_web::WebTemplate;
use souk_core::{Dzd, ShippingZone, WilayaCode};
use tracing::instrument;

use crate::components::TableSkeleton;
use crate::filters;
use crate::middleware::{CurrentUser, RequestStores};
use crate::routes::AdminUserView;
use crate::services::load_shipping_zones;

const TABLE_PATH: &str = "/admin/shipping-zones/table";

/// Shipping zones page shell.
#[derive(Template, WebTemplate)]
#[template(path = "shipping_zones.html")]
pub struct ShippingZonesTemplate {
    pub admin: AdminUserView,
    pub current_path: &'static str,
    pub skeleton: TableSkeleton,
}

/// One table row.
#[derive(Debug, Clone)]
pub struct ZoneRow {
    pub code: WilayaCode,
    pub name: &'static str,
    pub home_delivery_price: Dzd,
    pub desk_delivery_price: Dzd,
}

impl From<ShippingZone> for ZoneRow {
    fn from(zone: ShippingZone) -> Self {
        Self {
            code: zone.wilaya_code,
            name: zone.wilaya_code.name().unwrap_or_default(),
            home_delivery_price: zone.home_delivery_price,
            desk_delivery_price: zone.desk_delivery_price,
        }
    }
}

/// Shipping zones table fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/shipping_zones_table.html")]
pub struct ShippingZonesTableTemplate {
    pub zones: Vec<ZoneRow>,
}

/// GET /admin/shipping-zones
pub async fn index(CurrentUser(user): CurrentUser) -> ShippingZonesTemplate {
    ShippingZonesTemplate {
        admin: AdminUserView::from(&user),
        current_path: "/admin/shipping-zones",
        skeleton: TableSkeleton::new(TABLE_PATH, 8, 4),
    }
}

/// GET /admin/shipping-zones/table
#[instrument(skip_all)]
pub async fn table(RequestStores(stores): RequestStores) -> ShippingZonesTableTemplate {
    let zones = load_shipping_zones(stores.as_ref()).await;

    ShippingZonesTableTemplate {
        zones: zones.into_iter().map(ZoneRow::from).collect(),
    }
}
