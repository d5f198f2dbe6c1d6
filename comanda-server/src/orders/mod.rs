//! Order lifecycle engine
//!
//! The one genuinely stateful part of the server:
//!
//! - [`totals`] - derives an order's total from its detail lines
//! - [`occupancy`] - maps order status onto table occupancy
//! - [`locks`] - per-table serialization of mutating operations
//! - [`coordinator`] - the orchestrator tying the above together

pub mod coordinator;
pub mod locks;
pub mod occupancy;
pub mod totals;

pub use coordinator::{
    OrderCoordinator, OrderCreateRequest, OrderLineRequest, OrderUpdateRequest, SettleRequest,
};
pub use locks::TableLocks;

#[cfg(test)]
mod tests;
