//! Dining Table Model

use serde::{Deserialize, Serialize};
use shared::models::TableStatus;
use surrealdb::RecordId;

use super::serde_helpers;

/// Dining table entity (桌台)
///
/// `status` is mutated exclusively by the order lifecycle engine while
/// an order is open against the table; the management API may only set
/// it when no open order exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub location: Option<String>,
    #[serde(default = "default_seats")]
    pub seats: i32,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_seats() -> i32 {
    4
}

fn default_true() -> bool {
    true
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub name: String,
    pub location: Option<String>,
    pub seats: Option<i32>,
    pub description: Option<String>,
}

/// Update dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub seats: Option<i32>,
    pub description: Option<String>,
    /// Manual status override (e.g. marking a table RESERVED)
    pub status: Option<TableStatus>,
    pub is_active: Option<bool>,
}
