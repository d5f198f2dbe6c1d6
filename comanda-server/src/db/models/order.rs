//! Order and Order Detail Models
//!
//! The order row carries the derived `total_price` and denormalized
//! table/user names so list views and invoices never need joins. The
//! detail rows reference their parent order and the ordered product.

use serde::{Deserialize, Serialize};
use shared::models::{OrderDetailStatus, OrderOption, OrderStatus};
use surrealdb::RecordId;

use super::serde_helpers;

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub note: Option<String>,
    /// Derived: Σ(quantity × price) over the live detail lines.
    /// Never taken from the client.
    pub total_price: f64,
    pub option: OrderOption,
    pub status: OrderStatus,
    /// Attached table; `None` means takeaway
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub dining_table: Option<RecordId>,
    /// Table name at the time of attachment
    pub table_name: Option<String>,
    /// Staff member who opened the order
    pub user_id: String,
    pub user_name: String,
    pub created_by: String,
    pub created_at: i64,
    pub modified_by: Option<String>,
    pub modified_at: Option<i64>,
}

/// Order line entity
///
/// `price` is a snapshot of the product's selling price taken when the
/// line was added; later catalog changes do not touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub product_id: RecordId,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(default)]
    pub status: OrderDetailStatus,
    pub created_at: i64,
}
