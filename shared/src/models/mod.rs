//! Wire-level models
//!
//! Status enums and view models exchanged between server and clients.
//! Storage-side entities live in the server crate; these types are the
//! JSON surface.

pub mod dining_table;
pub mod invoice;
pub mod order;

pub use dining_table::TableStatus;
pub use invoice::{InvoiceStatus, InvoiceView, PaymentMethod};
pub use order::{
    OrderDetailStatus, OrderLineView, OrderOption, OrderStatus, OrderView, TableSummary,
    UserSummary,
};
