//! Invoice wire types

use serde::{Deserialize, Serialize};

use super::order::UserSummary;

/// How the customer settled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
}

/// Invoice status
///
/// Invoices are written once at settlement; only the status may move
/// afterwards (e.g. a later refund flow).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Paid,
    Refunded,
}

/// Nested order summary on invoice views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    /// Table name at settlement time, `None` for takeaway orders
    pub table_name: Option<String>,
}

/// Invoice representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceView {
    pub id: String,
    pub total_amount: f64,
    pub customer_paid: f64,
    pub return_amount: f64,
    pub method: PaymentMethod,
    pub status: InvoiceStatus,
    pub user: UserSummary,
    pub order: OrderSummary,
    pub created_by: String,
    pub created_at: i64,
}
