//! Invoice Model

use serde::{Deserialize, Serialize};
use shared::models::{InvoiceStatus, PaymentMethod};
use surrealdb::RecordId;

use super::serde_helpers;

/// Invoice entity, written once at settlement and immutable afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub total_amount: f64,
    pub customer_paid: f64,
    /// Change returned to the customer (customer_paid - total_amount)
    pub return_amount: f64,
    pub method: PaymentMethod,
    pub status: InvoiceStatus,
    /// Settled order (one-to-one)
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    /// Table name at settlement time, for receipt display
    pub table_name: Option<String>,
    /// Staff member who settled
    pub user_id: String,
    pub user_name: String,
    pub created_by: String,
    pub created_at: i64,
}
