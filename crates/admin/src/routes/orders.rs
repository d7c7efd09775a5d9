//! Orders page and table fragment.
//!
//! Orders are shown as the backend returns them: one column per key seen
//! across the rows, in first-seen order.

use askama::Template;
use askama_web::WebTemplate;
use souk_core::Order;
use souk_core::types::order;
use tracing::instrument;

use crate::components::TableSkeleton;
use crate::filters;
use crate::middleware::{CurrentUser, RequestStores};
use crate::routes::AdminUserView;
use crate::services::load_orders;

const TABLE_PATH: &str = "/admin/orders/table";

/// Orders page shell.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub admin: AdminUserView,
    pub current_path: &'static str,
    pub skeleton: TableSkeleton,
}

/// Orders table fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/orders_table.html")]
pub struct OrdersTableTemplate {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl OrdersTableTemplate {
    #[must_use]
    pub fn new(orders: &[Order]) -> Self {
        let columns = order::columns(orders);
        let rows = orders
            .iter()
            .map(|o| columns.iter().map(|c| o.display(c)).collect())
            .collect();
        Self { columns, rows }
    }
}

/// GET /admin/orders
pub async fn index(CurrentUser(user): CurrentUser) -> OrdersTemplate {
    OrdersTemplate {
        admin: AdminUserView::from(&user),
        current_path: "/admin/orders",
        skeleton: TableSkeleton::new(TABLE_PATH, 5, 6),
    }
}

/// GET /admin/orders/table
#[instrument(skip_all)]
pub async fn table(RequestStores(stores): RequestStores) -> OrdersTableTemplate {
    OrdersTableTemplate::new(&load_orders(stores.as_ref()).await)
}
