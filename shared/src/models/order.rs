//! Order wire types
//!
//! Status/option enums plus the order view returned by the API.

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// `Pending` → `Completed` → `Paid` (terminal). Deletion is the other
/// terminal exit, allowed from any state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Completed,
    Paid,
}

impl OrderStatus {
    /// Whether the order still counts against its table's occupancy
    pub fn is_open(&self) -> bool {
        !matches!(self, OrderStatus::Paid)
    }

    /// Legal status moves for caller-supplied updates.
    ///
    /// Re-submitting the current status is allowed (updates are
    /// idempotent); `Paid` is terminal and only ever reached through
    /// settlement, never through a plain update.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Pending) | (Pending, Completed) | (Completed, Completed)
        )
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Paid => "PAID",
        };
        f.write_str(s)
    }
}

/// Service option, derived from whether a table is attached
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderOption {
    DineIn,
    Takeaway,
}

/// Line item status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDetailStatus {
    Confirmed,
}

impl Default for OrderDetailStatus {
    fn default() -> Self {
        Self::Confirmed
    }
}

/// Nested table summary on order views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    pub id: String,
    pub name: String,
}

/// Nested user summary on order views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
}

/// One line of an order as exposed over the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineView {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    /// Unit price snapshot taken when the line was added
    pub price: f64,
    pub status: OrderDetailStatus,
}

impl std::fmt::Display for OrderOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderOption::DineIn => "DINE_IN",
            OrderOption::Takeaway => "TAKEAWAY",
        };
        f.write_str(s)
    }
}

/// Full order representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub id: String,
    pub note: Option<String>,
    pub total_price: f64,
    pub option: OrderOption,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dining_table: Option<TableSummary>,
    pub user: UserSummary,
    #[serde(default)]
    pub details: Vec<OrderLineView>,
    pub created_by: String,
    pub created_at: i64,
    pub modified_by: Option<String>,
    pub modified_at: Option<i64>,
}
