//! Storage Models
//!
//! Entities as persisted in SurrealDB. Wire-level enums come from the
//! `shared` crate so server and clients agree on the JSON shape.

pub mod serde_helpers;

pub mod dining_table;
pub mod invoice;
pub mod order;
pub mod product;

pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use invoice::Invoice;
pub use order::{Order, OrderDetail};
pub use product::{Product, ProductCreate, ProductUpdate};
