//! Table occupancy state machine
//!
//! A table mirrors the liveness of the order attached to it: open
//! order (PENDING/COMPLETED) means OCCUPIED, settled (PAID) means
//! AVAILABLE. Deletion/cancellation is handled by the coordinator,
//! which forces AVAILABLE regardless of the order's last status so a
//! cancelled order can never strand a table. RESERVED is outside this
//! machine's transition set.

use shared::models::{OrderStatus, TableStatus};

/// Occupancy a table should reflect for the given order status
pub fn table_status_for(status: OrderStatus) -> TableStatus {
    match status {
        OrderStatus::Pending | OrderStatus::Completed => TableStatus::Occupied,
        OrderStatus::Paid => TableStatus::Available,
    }
}
