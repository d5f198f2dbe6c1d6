//! Order lifecycle coordinator
//!
//! Owns order creation, update, deletion and settlement. Every
//! mutating operation:
//!
//! 1. acquires the locks of the resources it touches (table id, order
//!    id) so competing writers on the same table serialize,
//! 2. re-reads the order under the lock,
//! 3. reconciles detail lines and recomputes the derived total,
//! 4. mirrors the order status onto the table's occupancy.
//!
//! The table mirror write is best-effort: order data is the source of
//! truth, and a table that vanished mid-operation is logged and
//! skipped rather than failing the request.

use std::collections::HashMap;

use serde::Deserialize;
use shared::models::{
    InvoiceStatus, OrderDetailStatus, OrderOption, OrderStatus, PaymentMethod, TableStatus,
};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{locks::TableLocks, occupancy, totals};
use crate::auth::CurrentUser;
use crate::db::models::{DiningTable, Invoice, Order, OrderDetail, Product};
use crate::db::repository::{
    DiningTableRepository, InvoiceRepository, OrderRepository, ProductRepository,
};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_quantity};
use crate::utils::{AppError, AppResult};

/// One requested order line. Lines without an `id` are created; lines
/// with an `id` update the existing detail in place.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineRequest {
    pub id: Option<String>,
    pub product_id: String,
    pub quantity: i32,
}

/// Create order payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreateRequest {
    /// Table to open the order against; absent means takeaway
    pub dining_table: Option<String>,
    pub note: Option<String>,
    /// Initial status, defaults to PENDING
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub details: Vec<OrderLineRequest>,
}

/// Update order payload. Lines previously attached but omitted here
/// are deleted.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderUpdateRequest {
    pub dining_table: Option<String>,
    pub note: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub details: Vec<OrderLineRequest>,
}

/// Settle payload: issue the invoice and close the order in one call
#[derive(Debug, Clone, Deserialize)]
pub struct SettleRequest {
    pub method: PaymentMethod,
    pub customer_paid: f64,
}

/// Planned line reconciliation, computed before any write happens
struct LinePlan {
    updates: Vec<OrderDetail>,
    creations: Vec<OrderDetail>,
    deletions: Vec<RecordId>,
}

pub struct OrderCoordinator {
    orders: OrderRepository,
    tables: DiningTableRepository,
    products: ProductRepository,
    invoices: InvoiceRepository,
    locks: TableLocks,
}

impl OrderCoordinator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            tables: DiningTableRepository::new(db.clone()),
            products: ProductRepository::new(db.clone()),
            invoices: InvoiceRepository::new(db),
            locks: TableLocks::new(),
        }
    }

    // ==================== Operations ====================

    /// Open a new order, optionally against a table.
    pub async fn create(
        &self,
        user: &CurrentUser,
        req: OrderCreateRequest,
    ) -> AppResult<(Order, Vec<OrderDetail>)> {
        validate_optional_text(&req.note, "note", MAX_NOTE_LEN)?;
        for line in &req.details {
            validate_quantity(line.quantity)?;
        }

        let status = req.status.unwrap_or_default();
        if status == OrderStatus::Paid {
            return Err(AppError::validation(
                "An order cannot be created as PAID; settle it instead",
            ));
        }

        let table_rid = req.dining_table.as_deref().map(parse_table_id).transpose()?;

        let _guards = self
            .locks
            .acquire_keys(lock_keys(None, table_rid.as_ref(), None))
            .await;

        // Resolve the table under the lock and enforce the
        // one-open-order-per-table invariant
        let table = match &table_rid {
            Some(rid) => {
                let table = self.resolve_table(rid).await?;
                if self.orders.has_open_order_for_table(rid, None).await? {
                    return Err(AppError::conflict(format!(
                        "Table '{}' already has an open order",
                        table.name
                    )));
                }
                Some(table)
            }
            None => None,
        };

        // Resolve every product before the first write so a missing
        // product cannot leave an orphaned order shell behind
        let mut products = Vec::with_capacity(req.details.len());
        for line in &req.details {
            products.push(self.resolve_product(&line.product_id).await?);
        }

        let now = shared::now_millis();
        let order = Order {
            id: None,
            note: req.note.clone(),
            total_price: 0.0,
            option: option_for(&table_rid),
            status,
            dining_table: table_rid.clone(),
            table_name: table.as_ref().map(|t| t.name.clone()),
            user_id: user.id.clone(),
            user_name: user.username.clone(),
            created_by: user.username.clone(),
            created_at: now,
            modified_by: None,
            modified_at: None,
        };
        let mut order = self.orders.create(order).await?;
        let order_rid = require_id(&order.id)?;

        // Attach lines, snapshotting each product's current price
        let mut details = Vec::with_capacity(req.details.len());
        for (line, product) in req.details.iter().zip(&products) {
            let detail = OrderDetail {
                id: None,
                order_id: order_rid.clone(),
                product_id: require_id(&product.id)?,
                product_name: product.name.clone(),
                quantity: line.quantity,
                price: product.selling_price,
                status: OrderDetailStatus::Confirmed,
                created_at: shared::now_millis(),
            };
            details.push(self.orders.create_detail(detail).await?);
        }

        let total = totals::order_total(&details);
        self.orders.set_total(&order_rid, total).await?;
        order.total_price = total;

        self.mirror_table_status(order.dining_table.as_ref(), occupancy::table_status_for(status))
            .await;

        tracing::info!(
            order = %order_rid,
            table = ?order.table_name,
            total = total,
            "Order created"
        );
        Ok((order, details))
    }

    /// Update an order: status, note, table reference and detail lines.
    pub async fn update(
        &self,
        user: &CurrentUser,
        id: &str,
        req: OrderUpdateRequest,
    ) -> AppResult<(Order, Vec<OrderDetail>)> {
        validate_optional_text(&req.note, "note", MAX_NOTE_LEN)?;
        for line in &req.details {
            validate_quantity(line.quantity)?;
        }

        let existing = self.require_order(id).await?;
        let order_rid = require_id(&existing.id)?;
        let new_table_rid = req.dining_table.as_deref().map(parse_table_id).transpose()?;

        let _guards = self
            .locks
            .acquire_keys(lock_keys(
                Some(&order_rid),
                existing.dining_table.as_ref(),
                new_table_rid.as_ref(),
            ))
            .await;

        // Re-read under the lock; a competing writer may have moved it
        let existing = self.require_order(id).await?;

        if !existing.status.can_transition_to(req.status) {
            return Err(AppError::validation(format!(
                "Illegal status transition {} -> {}",
                existing.status, req.status
            )));
        }

        let table = match &new_table_rid {
            Some(rid) => {
                let table = self.resolve_table(rid).await?;
                if self
                    .orders
                    .has_open_order_for_table(rid, Some(&order_rid))
                    .await?
                {
                    return Err(AppError::conflict(format!(
                        "Table '{}' already has an open order",
                        table.name
                    )));
                }
                Some(table)
            }
            None => None,
        };

        // Plan the line reconciliation first: all lookups and
        // validation happen before the first write, so a bad line
        // cannot leave totals out of sync with the stored lines
        let plan = self.plan_lines(&order_rid, &req.details).await?;

        // Moving (or detaching) the order frees the previous table
        if existing.dining_table != new_table_rid {
            self.mirror_table_status(existing.dining_table.as_ref(), TableStatus::Available)
                .await;
        }

        let details = self.apply_line_plan(plan).await?;
        let total = totals::order_total(&details);

        let updated = Order {
            id: None,
            note: req.note.clone(),
            total_price: total,
            option: option_for(&new_table_rid),
            status: req.status,
            dining_table: new_table_rid.clone(),
            table_name: table.as_ref().map(|t| t.name.clone()),
            user_id: existing.user_id.clone(),
            user_name: existing.user_name.clone(),
            created_by: existing.created_by.clone(),
            created_at: existing.created_at,
            modified_by: Some(user.username.clone()),
            modified_at: Some(shared::now_millis()),
        };
        let order = self.orders.update(&order_rid, updated).await?;

        // The transition is a function of the target status, not a diff
        self.mirror_table_status(
            order.dining_table.as_ref(),
            occupancy::table_status_for(order.status),
        )
        .await;

        tracing::info!(order = %order_rid, status = %order.status, total = total, "Order updated");
        Ok((order, details))
    }

    /// Delete (cancel) an order, releasing its table.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let existing = self.require_order(id).await?;
        let order_rid = require_id(&existing.id)?;

        let _guards = self
            .locks
            .acquire_keys(lock_keys(
                Some(&order_rid),
                existing.dining_table.as_ref(),
                None,
            ))
            .await;

        let Some(existing) = self.orders.find_by_id(id).await? else {
            // Lost the race to another delete; nothing left to do
            return Ok(());
        };

        // Forced release: a cancelled order must never strand a table
        // in OCCUPIED, whatever its last recorded status was
        self.mirror_table_status(existing.dining_table.as_ref(), TableStatus::Available)
            .await;

        self.orders.delete_details_by_order(&order_rid).await?;
        self.orders.delete(&order_rid).await?;

        tracing::info!(order = %order_rid, table = ?existing.table_name, "Order deleted");
        Ok(())
    }

    /// Settle a completed order: issue the invoice, mark the order
    /// PAID and release the table, all under the table lock.
    pub async fn settle(
        &self,
        user: &CurrentUser,
        id: &str,
        req: SettleRequest,
    ) -> AppResult<Invoice> {
        if !req.customer_paid.is_finite() || req.customer_paid < 0.0 {
            return Err(AppError::validation(format!(
                "customer_paid must be a non-negative amount, got {}",
                req.customer_paid
            )));
        }

        let existing = self.require_order(id).await?;
        let order_rid = require_id(&existing.id)?;

        let _guards = self
            .locks
            .acquire_keys(lock_keys(
                Some(&order_rid),
                existing.dining_table.as_ref(),
                None,
            ))
            .await;

        let order = self.require_order(id).await?;

        if order.status != OrderStatus::Completed {
            return Err(AppError::business_rule(format!(
                "Order {} is not in a settleable status ({})",
                id, order.status
            )));
        }
        if self.invoices.find_by_order(&order_rid).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Order {} already has an invoice",
                id
            )));
        }
        if !totals::is_payment_sufficient(req.customer_paid, order.total_price) {
            return Err(AppError::validation(format!(
                "Customer paid {:.2} but the order total is {:.2}",
                req.customer_paid, order.total_price
            )));
        }

        let now = shared::now_millis();
        let invoice = self
            .invoices
            .create(Invoice {
                id: None,
                total_amount: order.total_price,
                customer_paid: req.customer_paid,
                return_amount: totals::change_due(order.total_price, req.customer_paid),
                method: req.method,
                status: InvoiceStatus::Paid,
                order_id: order_rid.clone(),
                table_name: order.table_name.clone(),
                user_id: user.id.clone(),
                user_name: user.username.clone(),
                created_by: user.username.clone(),
                created_at: now,
            })
            .await?;

        let mut paid = order.clone();
        paid.status = OrderStatus::Paid;
        paid.modified_by = Some(user.username.clone());
        paid.modified_at = Some(now);
        let order = self.orders.update(&order_rid, paid).await?;

        self.mirror_table_status(order.dining_table.as_ref(), TableStatus::Available)
            .await;

        tracing::info!(
            order = %order_rid,
            method = ?req.method,
            change = invoice.return_amount,
            "Order settled"
        );
        Ok(invoice)
    }

    /// Fetch one order with its lines.
    pub async fn get(&self, id: &str) -> AppResult<(Order, Vec<OrderDetail>)> {
        let order = self.require_order(id).await?;
        let order_rid = require_id(&order.id)?;
        let details = self.orders.find_details_by_order(&order_rid).await?;
        Ok((order, details))
    }

    /// List orders, most recent first (without lines).
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_all(limit, offset).await?)
    }

    /// The most recently opened non-paid order for a table, used to
    /// let staff resume an in-progress table. `None` when the table is
    /// free; 404 only when the table itself does not exist.
    pub async fn latest_open_for_table(
        &self,
        table_id: &str,
    ) -> AppResult<Option<(Order, Vec<OrderDetail>)>> {
        let table = self
            .tables
            .find_by_id(table_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Dining table {} not found", table_id)))?;
        let table_rid = require_id(&table.id)?;

        match self.orders.find_latest_open_by_table(&table_rid).await? {
            Some(order) => {
                let order_rid = require_id(&order.id)?;
                let details = self.orders.find_details_by_order(&order_rid).await?;
                Ok(Some((order, details)))
            }
            None => Ok(None),
        }
    }

    // ==================== Internals ====================

    /// Plan the reconciliation of requested lines against the stored
    /// ones. Pure lookups and validation, no writes:
    /// - request lines without id become creations (price snapshotted
    ///   from the current catalog)
    /// - request lines with id become in-place updates; the price
    ///   snapshot is kept unless the product changed
    /// - stored lines missing from the request become deletions
    async fn plan_lines(
        &self,
        order_rid: &RecordId,
        requested: &[OrderLineRequest],
    ) -> AppResult<LinePlan> {
        let current = self.orders.find_details_by_order(order_rid).await?;
        let mut current_by_id: HashMap<String, OrderDetail> = current
            .into_iter()
            .filter_map(|d| d.id.as_ref().map(|rid| (rid.to_string(), d.clone())))
            .collect();

        let mut updates = Vec::new();
        let mut creations = Vec::new();
        for line in requested {
            match &line.id {
                Some(line_id) => {
                    let mut detail = current_by_id.remove(line_id).ok_or_else(|| {
                        AppError::not_found(format!("Order detail {} not found", line_id))
                    })?;

                    let requested_product: RecordId =
                        line.product_id.parse().map_err(|_| {
                            AppError::validation(format!(
                                "Invalid product ID: {}",
                                line.product_id
                            ))
                        })?;
                    if requested_product != detail.product_id {
                        // Product swapped: snapshot the new product's price
                        let product = self.resolve_product(&line.product_id).await?;
                        detail.product_id = require_id(&product.id)?;
                        detail.product_name = product.name.clone();
                        detail.price = product.selling_price;
                    }
                    detail.quantity = line.quantity;

                    updates.push(detail);
                }
                None => {
                    let product = self.resolve_product(&line.product_id).await?;
                    creations.push(OrderDetail {
                        id: None,
                        order_id: order_rid.clone(),
                        product_id: require_id(&product.id)?,
                        product_name: product.name.clone(),
                        quantity: line.quantity,
                        price: product.selling_price,
                        status: OrderDetailStatus::Confirmed,
                        created_at: shared::now_millis(),
                    });
                }
            }
        }

        // Whatever the request no longer mentions is gone
        let deletions = current_by_id.into_values().filter_map(|d| d.id).collect();

        Ok(LinePlan {
            updates,
            creations,
            deletions,
        })
    }

    /// Execute a line plan and return the surviving lines.
    async fn apply_line_plan(&self, plan: LinePlan) -> AppResult<Vec<OrderDetail>> {
        let mut details = Vec::with_capacity(plan.updates.len() + plan.creations.len());
        for detail in plan.updates {
            let rid = require_id(&detail.id)?;
            details.push(self.orders.update_detail(&rid, detail).await?);
        }
        for detail in plan.creations {
            details.push(self.orders.create_detail(detail).await?);
        }
        for rid in plan.deletions {
            self.orders.delete_detail(&rid).await?;
        }
        Ok(details)
    }

    /// Best-effort write of a table's occupancy. A missing table is
    /// logged and skipped: order data stays authoritative even when
    /// the mirror cannot be applied.
    async fn mirror_table_status(&self, table: Option<&RecordId>, status: TableStatus) {
        let Some(rid) = table else {
            return;
        };
        match self.tables.set_status(rid, status).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(table = %rid, "Table no longer exists, skipping status mirror");
            }
            Err(e) => {
                tracing::warn!(table = %rid, error = %e, "Failed to mirror table status");
            }
        }
    }

    async fn require_order(&self, id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))
    }

    async fn resolve_table(&self, rid: &RecordId) -> AppResult<DiningTable> {
        self.tables
            .find_by_id(&rid.to_string())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Dining table {} not found", rid)))
    }

    async fn resolve_product(&self, id: &str) -> AppResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))
    }
}

fn parse_table_id(id: &str) -> AppResult<RecordId> {
    id.parse()
        .map_err(|_| AppError::validation(format!("Invalid table ID: {}", id)))
}

fn option_for(table: &Option<RecordId>) -> OrderOption {
    if table.is_some() {
        OrderOption::DineIn
    } else {
        OrderOption::Takeaway
    }
}

fn require_id(id: &Option<RecordId>) -> AppResult<RecordId> {
    id.clone()
        .ok_or_else(|| AppError::internal("Record is missing its id".to_string()))
}

/// Lock keys for one operation: the order itself plus every table it
/// touches (old and new on a move). The lock registry sorts and
/// dedups before acquiring.
fn lock_keys(
    order: Option<&RecordId>,
    old_table: Option<&RecordId>,
    new_table: Option<&RecordId>,
) -> Vec<String> {
    [order, old_table, new_table]
        .into_iter()
        .flatten()
        .map(|rid| rid.to_string())
        .collect()
}
