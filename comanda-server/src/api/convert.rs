//! Entity → view conversions
//!
//! Storage entities carry record ids and denormalized names; the view
//! types in `shared` are what actually goes over the wire.

use shared::models::{
    InvoiceView, OrderLineView, OrderView, TableSummary, UserSummary, invoice::OrderSummary,
};
use surrealdb::RecordId;

use crate::db::models::{Invoice, Order, OrderDetail};

fn id_string(id: &Option<RecordId>) -> String {
    id.as_ref().map(|rid| rid.to_string()).unwrap_or_default()
}

/// Order with its detail lines
pub fn order_view(order: &Order, details: &[OrderDetail]) -> OrderView {
    OrderView {
        id: id_string(&order.id),
        note: order.note.clone(),
        total_price: order.total_price,
        option: order.option,
        status: order.status,
        dining_table: order.dining_table.as_ref().map(|rid| TableSummary {
            id: rid.to_string(),
            name: order.table_name.clone().unwrap_or_default(),
        }),
        user: UserSummary {
            id: order.user_id.clone(),
            name: order.user_name.clone(),
        },
        details: details.iter().map(line_view).collect(),
        created_by: order.created_by.clone(),
        created_at: order.created_at,
        modified_by: order.modified_by.clone(),
        modified_at: order.modified_at,
    }
}

/// Order without lines, for list endpoints
pub fn order_summary_view(order: &Order) -> OrderView {
    order_view(order, &[])
}

fn line_view(detail: &OrderDetail) -> OrderLineView {
    OrderLineView {
        id: id_string(&detail.id),
        product_id: detail.product_id.to_string(),
        product_name: detail.product_name.clone(),
        quantity: detail.quantity,
        price: detail.price,
        status: detail.status,
    }
}

pub fn invoice_view(invoice: &Invoice) -> InvoiceView {
    InvoiceView {
        id: id_string(&invoice.id),
        total_amount: invoice.total_amount,
        customer_paid: invoice.customer_paid,
        return_amount: invoice.return_amount,
        method: invoice.method,
        status: invoice.status,
        user: UserSummary {
            id: invoice.user_id.clone(),
            name: invoice.user_name.clone(),
        },
        order: OrderSummary {
            id: invoice.order_id.to_string(),
            table_name: invoice.table_name.clone(),
        },
        created_by: invoice.created_by.clone(),
        created_at: invoice.created_at,
    }
}
