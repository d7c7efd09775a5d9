//! Orders.
//!
//! Orders are written by the checkout flow and read by the admin panel
//! without interpretation: the admin table shows whatever columns the
//! backend returns. Only `id` and `created_at` are surfaced explicitly,
//! for row keys and the default sort.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An order row, kept as the raw JSON object returned by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order(Map<String, Value>);

impl Order {
    /// Wrap a raw row.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The `id` column rendered as text, if present.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.0.get("id").map(display_value)
    }

    /// The raw `created_at` column, if present.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.0.get("created_at").and_then(Value::as_str)
    }

    /// All columns, keyed by column name.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// A single column rendered for display; missing columns render empty.
    #[must_use]
    pub fn display(&self, column: &str) -> String {
        self.0.get(column).map(display_value).unwrap_or_default()
    }
}

/// Column names across a set of orders. Keys within one order come back
/// sorted (the row is a `serde_json::Map`); new keys from later orders are
/// appended in first-seen order.
#[must_use]
pub fn columns(orders: &[Order]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for order in orders {
        for key in order.fields().keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
