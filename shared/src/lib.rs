//! Shared types for the comanda server and its clients
//!
//! Everything a POS client needs to talk to the server lives here:
//! wire-level enums and view models (`models`), the unified response
//! envelope (`response`) and small utilities (`util`).

pub mod models;
pub mod response;
pub mod util;

pub use response::{ApiResponse, PaginatedResponse, Pagination};
pub use util::{now_millis, snowflake_id};
