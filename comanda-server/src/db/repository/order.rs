//! Order Repository
//!
//! Persistence for orders and their detail lines. Lifecycle rules
//! (occupancy, totals, status transitions) live in the order engine;
//! this layer only reads and writes rows.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, new_record_id, parse_record_id};
use crate::db::models::{Order, OrderDetail};

const TABLE: &str = "orders";
const DETAIL_TABLE: &str = "order_detail";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    // ==================== Orders ====================

    /// Persist a new order shell
    pub async fn create(&self, mut order: Order) -> RepoResult<Order> {
        order.id = None;
        let created: Option<Order> = self
            .base
            .db()
            .create(new_record_id(TABLE))
            .content(order)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Replace an order row
    pub async fn update(&self, rid: &RecordId, mut order: Order) -> RepoResult<Order> {
        order.id = None;
        let updated: Option<Order> = self.base.db().update(rid.clone()).content(order).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", rid)))
    }

    /// Write the derived total onto an order
    pub async fn set_total(&self, rid: &RecordId, total_price: f64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $order SET total_price = $total")
            .bind(("order", rid.clone()))
            .bind(("total", total_price))
            .await?;
        Ok(())
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = parse_record_id(id)?;
        let order: Option<Order> = self.base.db().select(rid).await?;
        Ok(order)
    }

    /// List orders, most recent first
    pub async fn find_all(&self, limit: i64, offset: i64) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders ORDER BY created_at DESC LIMIT $limit START $offset")
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Most recently created non-paid order for a table, if any
    pub async fn find_latest_open_by_table(
        &self,
        table: &RecordId,
    ) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM orders WHERE dining_table = $table AND status != 'PAID' \
                 ORDER BY created_at DESC LIMIT 1",
            )
            .bind(("table", table.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Whether a table has an open (non-paid) order, optionally
    /// ignoring one order (used when that order itself is being moved)
    pub async fn has_open_order_for_table(
        &self,
        table: &RecordId,
        exclude: Option<&RecordId>,
    ) -> RepoResult<bool> {
        let orders: Vec<Order> = match exclude {
            Some(rid) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM orders WHERE dining_table = $table \
                         AND status != 'PAID' AND id != $self LIMIT 1",
                    )
                    .bind(("table", table.to_string()))
                    .bind(("self", rid.clone()))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM orders WHERE dining_table = $table \
                         AND status != 'PAID' LIMIT 1",
                    )
                    .bind(("table", table.to_string()))
                    .await?
                    .take(0)?
            }
        };
        Ok(!orders.is_empty())
    }

    /// Delete an order row (detail lines are removed separately)
    pub async fn delete(&self, rid: &RecordId) -> RepoResult<()> {
        let _: Option<Order> = self.base.db().delete(rid.clone()).await?;
        Ok(())
    }

    // ==================== Detail lines ====================

    /// Persist a new detail line
    pub async fn create_detail(&self, mut detail: OrderDetail) -> RepoResult<OrderDetail> {
        detail.id = None;
        let created: Option<OrderDetail> = self
            .base
            .db()
            .create(new_record_id(DETAIL_TABLE))
            .content(detail)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order detail".to_string()))
    }

    /// Replace a detail line
    pub async fn update_detail(
        &self,
        rid: &RecordId,
        mut detail: OrderDetail,
    ) -> RepoResult<OrderDetail> {
        detail.id = None;
        let updated: Option<OrderDetail> =
            self.base.db().update(rid.clone()).content(detail).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order detail {} not found", rid)))
    }

    /// All detail lines of an order, in creation order
    pub async fn find_details_by_order(&self, order: &RecordId) -> RepoResult<Vec<OrderDetail>> {
        let details: Vec<OrderDetail> = self
            .base
            .db()
            .query("SELECT * FROM order_detail WHERE order_id = $order ORDER BY created_at ASC")
            .bind(("order", order.to_string()))
            .await?
            .take(0)?;
        Ok(details)
    }

    /// Delete a single detail line
    pub async fn delete_detail(&self, rid: &RecordId) -> RepoResult<()> {
        let _: Option<OrderDetail> = self.base.db().delete(rid.clone()).await?;
        Ok(())
    }

    /// Delete all detail lines of an order
    pub async fn delete_details_by_order(&self, order: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE order_detail WHERE order_id = $order")
            .bind(("order", order.to_string()))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{OrderDetailStatus, OrderOption, OrderStatus};

    async fn repo() -> OrderRepository {
        let svc = DbService::new_in_memory().await.unwrap();
        OrderRepository::new(svc.db)
    }

    fn order_shell(table: Option<RecordId>, created_at: i64) -> Order {
        Order {
            id: None,
            note: None,
            total_price: 0.0,
            option: if table.is_some() {
                OrderOption::DineIn
            } else {
                OrderOption::Takeaway
            },
            status: OrderStatus::Pending,
            table_name: table.as_ref().map(|_| "T1".to_string()),
            dining_table: table,
            user_id: "employee:1".to_string(),
            user_name: "Ana".to_string(),
            created_by: "ana".to_string(),
            created_at,
            modified_by: None,
            modified_at: None,
        }
    }

    #[tokio::test]
    async fn create_and_find_order() {
        let repo = repo().await;
        let created = repo.create(order_shell(None, 1_000)).await.unwrap();
        let id = created.id.as_ref().unwrap().to_string();

        let fetched = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Pending);
        assert_eq!(fetched.option, OrderOption::Takeaway);
    }

    #[tokio::test]
    async fn latest_open_order_skips_paid() {
        let repo = repo().await;
        let table = new_record_id("dining_table");

        let mut first = repo
            .create(order_shell(Some(table.clone()), 1_000))
            .await
            .unwrap();
        let second = repo
            .create(order_shell(Some(table.clone()), 2_000))
            .await
            .unwrap();

        // Latest by creation time wins
        let latest = repo
            .find_latest_open_by_table(&table)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, second.id);

        // Paying the newest exposes the older open one
        let second_rid = second.id.clone().unwrap();
        let mut paid = second.clone();
        paid.status = OrderStatus::Paid;
        repo.update(&second_rid, paid).await.unwrap();

        let latest = repo
            .find_latest_open_by_table(&table)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, first.id);

        // Paying the last one empties the result
        let first_rid = first.id.clone().unwrap();
        first.status = OrderStatus::Paid;
        repo.update(&first_rid, first).await.unwrap();
        assert!(
            repo.find_latest_open_by_table(&table)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn open_order_check_can_exclude_self() {
        let repo = repo().await;
        let table = new_record_id("dining_table");
        let order = repo
            .create(order_shell(Some(table.clone()), 1_000))
            .await
            .unwrap();
        let rid = order.id.clone().unwrap();

        assert!(repo.has_open_order_for_table(&table, None).await.unwrap());
        assert!(
            !repo
                .has_open_order_for_table(&table, Some(&rid))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn detail_lines_follow_their_order() {
        let repo = repo().await;
        let order = repo.create(order_shell(None, 1_000)).await.unwrap();
        let order_rid = order.id.clone().unwrap();

        for (i, name) in ["Gazpacho", "Tortilla"].iter().enumerate() {
            repo.create_detail(OrderDetail {
                id: None,
                order_id: order_rid.clone(),
                product_id: new_record_id("product"),
                product_name: name.to_string(),
                quantity: 1,
                price: 5.0,
                status: OrderDetailStatus::Confirmed,
                created_at: 1_000 + i as i64,
            })
            .await
            .unwrap();
        }

        let details = repo.find_details_by_order(&order_rid).await.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].product_name, "Gazpacho");

        repo.delete_details_by_order(&order_rid).await.unwrap();
        assert!(
            repo.find_details_by_order(&order_rid)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
