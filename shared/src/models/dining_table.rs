//! Dining table wire types

use serde::{Deserialize, Serialize};

/// Occupancy state of a dining table (桌台状态)
///
/// `Occupied`/`Available` are driven by the order lifecycle engine;
/// `Reserved` is only ever set manually through the table management
/// API for future bookings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
}

impl Default for TableStatus {
    fn default() -> Self {
        Self::Available
    }
}
