use shared::models::{
    InvoiceStatus, OrderOption, OrderStatus, PaymentMethod, TableStatus,
};

use super::*;
use crate::auth::CurrentUser;
use crate::db::DbService;
use crate::db::models::{DiningTableCreate, Order, ProductCreate};
use crate::db::repository::{DiningTableRepository, OrderRepository, ProductRepository};
use crate::utils::AppError;

struct TestContext {
    coordinator: OrderCoordinator,
    tables: DiningTableRepository,
    products: ProductRepository,
    orders: OrderRepository,
}

async fn setup() -> TestContext {
    let svc = DbService::new_in_memory().await.unwrap();
    TestContext {
        coordinator: OrderCoordinator::new(svc.db.clone()),
        tables: DiningTableRepository::new(svc.db.clone()),
        products: ProductRepository::new(svc.db.clone()),
        orders: OrderRepository::new(svc.db),
    }
}

fn test_user() -> CurrentUser {
    CurrentUser {
        id: "employee:1".to_string(),
        username: "ana".to_string(),
        role: "waiter".to_string(),
        permissions: vec!["orders:manage".to_string()],
    }
}

impl TestContext {
    /// 建桌台，返回 "dining_table:id"
    async fn seed_table(&self, name: &str) -> String {
        let table = self
            .tables
            .create(DiningTableCreate {
                name: name.to_string(),
                location: None,
                seats: Some(4),
                description: None,
            })
            .await
            .unwrap();
        table.id.unwrap().to_string()
    }

    /// 建商品，返回 "product:id"
    async fn seed_product(&self, name: &str, price: f64) -> String {
        let product = self
            .products
            .create(ProductCreate {
                name: name.to_string(),
                selling_price: price,
                description: None,
            })
            .await
            .unwrap();
        product.id.unwrap().to_string()
    }

    async fn table_status(&self, table_id: &str) -> TableStatus {
        self.tables
            .find_by_id(table_id)
            .await
            .unwrap()
            .unwrap()
            .status
    }
}

fn line(product_id: &str, quantity: i32) -> OrderLineRequest {
    OrderLineRequest {
        id: None,
        product_id: product_id.to_string(),
        quantity,
    }
}

fn existing_line(id: &str, product_id: &str, quantity: i32) -> OrderLineRequest {
    OrderLineRequest {
        id: Some(id.to_string()),
        product_id: product_id.to_string(),
        quantity,
    }
}

fn create_req(table: Option<&str>, details: Vec<OrderLineRequest>) -> OrderCreateRequest {
    OrderCreateRequest {
        dining_table: table.map(|t| t.to_string()),
        note: None,
        status: None,
        details,
    }
}

/// Update request mirroring an order's current state
fn update_req(
    order: &Order,
    status: OrderStatus,
    details: Vec<OrderLineRequest>,
) -> OrderUpdateRequest {
    OrderUpdateRequest {
        dining_table: order.dining_table.as_ref().map(|r| r.to_string()),
        note: order.note.clone(),
        status,
        details,
    }
}

fn settle_req(customer_paid: f64) -> SettleRequest {
    SettleRequest {
        method: PaymentMethod::Cash,
        customer_paid,
    }
}

// ========================================================================
// 核心流程: create / update / delete
// ========================================================================

#[tokio::test]
async fn create_dine_in_computes_total_and_occupies_table() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 5").await;
    let product = ctx.seed_product("Cochinillo", 15_000.0).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![line(&product, 3)]))
        .await
        .unwrap();

    assert_eq!(order.total_price, 45_000.0);
    assert_eq!(order.option, OrderOption::DineIn);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.table_name.as_deref(), Some("Table 5"));
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].price, 15_000.0);
    assert_eq!(ctx.table_status(&table).await, TableStatus::Occupied);
}

#[tokio::test]
async fn delete_releases_table_and_removes_lines() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 5").await;
    let product = ctx.seed_product("Cochinillo", 15_000.0).await;

    let (order, _) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![line(&product, 3)]))
        .await
        .unwrap();
    let order_id = order.id.clone().unwrap().to_string();
    let order_rid = order.id.unwrap();

    ctx.coordinator.delete(&order_id).await.unwrap();

    assert_eq!(ctx.table_status(&table).await, TableStatus::Available);
    assert!(ctx.orders.find_by_id(&order_id).await.unwrap().is_none());
    assert!(
        ctx.orders
            .find_details_by_order(&order_rid)
            .await
            .unwrap()
            .is_empty()
    );

    let err = ctx.coordinator.get(&order_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_quantity_recomputes_total_and_keeps_table_occupied() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 5").await;
    let product = ctx.seed_product("Cochinillo", 15_000.0).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![line(&product, 3)]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();
    let line_id = details[0].id.as_ref().unwrap().to_string();

    let (updated, _) = ctx
        .coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(
                &order,
                OrderStatus::Pending,
                vec![existing_line(&line_id, &product, 1)],
            ),
        )
        .await
        .unwrap();

    assert_eq!(updated.total_price, 15_000.0);
    assert_eq!(ctx.table_status(&table).await, TableStatus::Occupied);
}

#[tokio::test]
async fn takeaway_order_never_touches_tables() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 1").await;
    let p1 = ctx.seed_product("Café", 1.50).await;
    let p2 = ctx.seed_product("Croissant", 2.20).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![line(&p1, 1), line(&p2, 2)]))
        .await
        .unwrap();

    assert_eq!(order.option, OrderOption::Takeaway);
    assert!(order.dining_table.is_none());
    assert_eq!(details.len(), 2);
    assert_eq!(order.total_price, 5.90);
    assert_eq!(ctx.table_status(&table).await, TableStatus::Available);

    let order_id = order.id.unwrap().to_string();
    ctx.coordinator.delete(&order_id).await.unwrap();
    assert_eq!(ctx.table_status(&table).await, TableStatus::Available);
}

#[tokio::test]
async fn empty_order_totals_zero() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 2").await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![]))
        .await
        .unwrap();

    assert_eq!(order.total_price, 0.0);
    assert!(details.is_empty());
    assert_eq!(ctx.table_status(&table).await, TableStatus::Occupied);
}

// ========================================================================
// 一桌一单: the one-open-order-per-table invariant
// ========================================================================

#[tokio::test]
async fn second_open_order_on_same_table_is_rejected() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 5").await;

    ctx.coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![]))
        .await
        .unwrap();

    let err = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn settled_table_can_be_reopened() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 5").await;
    let product = ctx.seed_product("Menu del día", 12.0).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![line(&product, 1)]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();
    let line_id = details[0].id.as_ref().unwrap().to_string();

    ctx.coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(
                &order,
                OrderStatus::Completed,
                vec![existing_line(&line_id, &product, 1)],
            ),
        )
        .await
        .unwrap();
    ctx.coordinator
        .settle(&test_user(), &order_id, settle_req(12.0))
        .await
        .unwrap();

    // Table is free again, a new order may open against it
    assert_eq!(ctx.table_status(&table).await, TableStatus::Available);
    ctx.coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![]))
        .await
        .unwrap();
    assert_eq!(ctx.table_status(&table).await, TableStatus::Occupied);
}

#[tokio::test]
async fn moving_an_order_frees_the_old_table() {
    let ctx = setup().await;
    let table_a = ctx.seed_table("Table A").await;
    let table_b = ctx.seed_table("Table B").await;

    let (order, _) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table_a.as_str()), vec![]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let (moved, _) = ctx
        .coordinator
        .update(
            &test_user(),
            &order_id,
            OrderUpdateRequest {
                dining_table: Some(table_b.clone()),
                note: None,
                status: OrderStatus::Pending,
                details: vec![],
            },
        )
        .await
        .unwrap();

    assert_eq!(moved.table_name.as_deref(), Some("Table B"));
    assert_eq!(ctx.table_status(&table_a).await, TableStatus::Available);
    assert_eq!(ctx.table_status(&table_b).await, TableStatus::Occupied);
}

#[tokio::test]
async fn detaching_the_table_turns_the_order_takeaway() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table A").await;

    let (order, _) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let (updated, _) = ctx
        .coordinator
        .update(
            &test_user(),
            &order_id,
            OrderUpdateRequest {
                dining_table: None,
                note: None,
                status: OrderStatus::Pending,
                details: vec![],
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.option, OrderOption::Takeaway);
    assert_eq!(ctx.table_status(&table).await, TableStatus::Available);
}

// ========================================================================
// 价格快照: snapshots survive catalog changes
// ========================================================================

#[tokio::test]
async fn price_snapshot_survives_catalog_change() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 3").await;
    let product = ctx.seed_product("Tarta", 6.00).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![line(&product, 2)]))
        .await
        .unwrap();
    assert_eq!(order.total_price, 12.00);
    let order_id = order.id.as_ref().unwrap().to_string();
    let line_id = details[0].id.as_ref().unwrap().to_string();

    // Catalog price changes after the line was added
    ctx.products
        .update(
            &product,
            crate::db::models::ProductUpdate {
                name: None,
                selling_price: Some(9.00),
                description: None,
                is_active: None,
            },
        )
        .await
        .unwrap();

    // Reading the order back still shows the snapshot
    let (fetched, _) = ctx.coordinator.get(&order_id).await.unwrap();
    assert_eq!(fetched.total_price, 12.00);

    // Editing only the quantity keeps the original snapshot too
    let (updated, details) = ctx
        .coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(
                &fetched,
                OrderStatus::Pending,
                vec![existing_line(&line_id, &product, 3)],
            ),
        )
        .await
        .unwrap();
    assert_eq!(details[0].price, 6.00);
    assert_eq!(updated.total_price, 18.00);
}

#[tokio::test]
async fn swapping_the_product_resnapshots_the_price() {
    let ctx = setup().await;
    let cheap = ctx.seed_product("Caña", 2.00).await;
    let fancy = ctx.seed_product("Vermut", 4.50).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![line(&cheap, 2)]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();
    let line_id = details[0].id.as_ref().unwrap().to_string();

    let (updated, details) = ctx
        .coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(
                &order,
                OrderStatus::Pending,
                vec![existing_line(&line_id, &fancy, 2)],
            ),
        )
        .await
        .unwrap();

    assert_eq!(details[0].price, 4.50);
    assert_eq!(details[0].product_name, "Vermut");
    assert_eq!(updated.total_price, 9.00);
}

// ========================================================================
// 行项目对账: line reconciliation
// ========================================================================

#[tokio::test]
async fn omitted_lines_are_deleted_and_new_lines_added() {
    let ctx = setup().await;
    let p1 = ctx.seed_product("Bravas", 5.00).await;
    let p2 = ctx.seed_product("Calamares", 8.00).await;
    let p3 = ctx.seed_product("Pan", 1.00).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![line(&p1, 1), line(&p2, 1)]))
        .await
        .unwrap();
    assert_eq!(order.total_price, 13.00);
    let order_id = order.id.as_ref().unwrap().to_string();
    let keep_id = details[0].id.as_ref().unwrap().to_string();

    // Keep p1, drop p2, add p3
    let (updated, details) = ctx
        .coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(
                &order,
                OrderStatus::Pending,
                vec![existing_line(&keep_id, &p1, 1), line(&p3, 2)],
            ),
        )
        .await
        .unwrap();

    assert_eq!(details.len(), 2);
    assert_eq!(updated.total_price, 7.00);

    let names: Vec<&str> = details.iter().map(|d| d.product_name.as_str()).collect();
    assert!(names.contains(&"Bravas"));
    assert!(names.contains(&"Pan"));
}

#[tokio::test]
async fn identical_update_twice_is_idempotent() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 7").await;
    let product = ctx.seed_product("Fideuá", 13.50).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![line(&product, 2)]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();
    let line_id = details[0].id.as_ref().unwrap().to_string();

    let req = update_req(
        &order,
        OrderStatus::Pending,
        vec![existing_line(&line_id, &product, 2)],
    );

    let (first, _) = ctx
        .coordinator
        .update(&test_user(), &order_id, req.clone())
        .await
        .unwrap();
    let (second, _) = ctx
        .coordinator
        .update(&test_user(), &order_id, req)
        .await
        .unwrap();

    assert_eq!(first.total_price, second.total_price);
    assert_eq!(ctx.table_status(&table).await, TableStatus::Occupied);
}

#[tokio::test]
async fn unknown_line_id_is_rejected() {
    let ctx = setup().await;
    let product = ctx.seed_product("Agua", 1.50).await;

    let (order, _) = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let err = ctx
        .coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(
                &order,
                OrderStatus::Pending,
                vec![existing_line("order_detail:404", &product, 1)],
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ========================================================================
// 状态机: transition table and validation
// ========================================================================

#[tokio::test]
async fn create_as_paid_is_rejected() {
    let ctx = setup().await;
    let err = ctx
        .coordinator
        .create(
            &test_user(),
            OrderCreateRequest {
                dining_table: None,
                note: None,
                status: Some(OrderStatus::Paid),
                details: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn backwards_transition_is_rejected() {
    let ctx = setup().await;
    let (order, _) = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    ctx.coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(&order, OrderStatus::Completed, vec![]),
        )
        .await
        .unwrap();

    let err = ctx
        .coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(&order, OrderStatus::Pending, vec![]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn paid_via_update_is_rejected() {
    let ctx = setup().await;
    let (order, _) = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let err = ctx
        .coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(&order, OrderStatus::Paid, vec![]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn negative_quantity_is_rejected() {
    let ctx = setup().await;
    let product = ctx.seed_product("Olivas", 2.00).await;

    let err = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![line(&product, -1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn missing_table_and_product_are_not_found() {
    let ctx = setup().await;
    let product = ctx.seed_product("Olivas", 2.00).await;

    let err = ctx
        .coordinator
        .create(
            &test_user(),
            create_req(Some("dining_table:404"), vec![line(&product, 1)]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![line("product:404", 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = ctx
        .coordinator
        .update(
            &test_user(),
            "orders:404",
            OrderUpdateRequest {
                dining_table: None,
                note: None,
                status: OrderStatus::Pending,
                details: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ========================================================================
// 结账: settlement
// ========================================================================

#[tokio::test]
async fn settle_issues_invoice_and_releases_table() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 5").await;
    let product = ctx.seed_product("Cordero", 30.00).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![line(&product, 1)]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();
    let line_id = details[0].id.as_ref().unwrap().to_string();

    ctx.coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(
                &order,
                OrderStatus::Completed,
                vec![existing_line(&line_id, &product, 1)],
            ),
        )
        .await
        .unwrap();
    // Completing the work keeps the table occupied until settlement
    assert_eq!(ctx.table_status(&table).await, TableStatus::Occupied);

    let invoice = ctx
        .coordinator
        .settle(&test_user(), &order_id, settle_req(50.00))
        .await
        .unwrap();

    assert_eq!(invoice.total_amount, 30.00);
    assert_eq!(invoice.customer_paid, 50.00);
    assert_eq!(invoice.return_amount, 20.00);
    assert_eq!(invoice.status, InvoiceStatus::Paid);
    assert_eq!(invoice.table_name.as_deref(), Some("Table 5"));

    let (settled, _) = ctx.coordinator.get(&order_id).await.unwrap();
    assert_eq!(settled.status, OrderStatus::Paid);
    assert_eq!(ctx.table_status(&table).await, TableStatus::Available);
}

#[tokio::test]
async fn settle_requires_completed_status() {
    let ctx = setup().await;
    let (order, _) = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let err = ctx
        .coordinator
        .settle(&test_user(), &order_id, settle_req(10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn settle_rejects_insufficient_payment() {
    let ctx = setup().await;
    let product = ctx.seed_product("Marisco", 42.00).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![line(&product, 1)]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();
    let line_id = details[0].id.as_ref().unwrap().to_string();
    ctx.coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(
                &order,
                OrderStatus::Completed,
                vec![existing_line(&line_id, &product, 1)],
            ),
        )
        .await
        .unwrap();

    let err = ctx
        .coordinator
        .settle(&test_user(), &order_id, settle_req(40.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn settling_twice_is_rejected() {
    let ctx = setup().await;
    let product = ctx.seed_product("Menu", 10.00).await;

    let (order, details) = ctx
        .coordinator
        .create(&test_user(), create_req(None, vec![line(&product, 1)]))
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();
    let line_id = details[0].id.as_ref().unwrap().to_string();
    ctx.coordinator
        .update(
            &test_user(),
            &order_id,
            update_req(
                &order,
                OrderStatus::Completed,
                vec![existing_line(&line_id, &product, 1)],
            ),
        )
        .await
        .unwrap();

    ctx.coordinator
        .settle(&test_user(), &order_id, settle_req(10.0))
        .await
        .unwrap();

    // The order is already PAID, so the status gate fires
    let err = ctx
        .coordinator
        .settle(&test_user(), &order_id, settle_req(10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

// ========================================================================
// 按桌查单: latest open order per table
// ========================================================================

#[tokio::test]
async fn latest_open_for_table_roundtrip() {
    let ctx = setup().await;
    let table = ctx.seed_table("Table 9").await;

    // Free table: no order, but not an error
    assert!(
        ctx.coordinator
            .latest_open_for_table(&table)
            .await
            .unwrap()
            .is_none()
    );

    let (order, _) = ctx
        .coordinator
        .create(&test_user(), create_req(Some(table.as_str()), vec![]))
        .await
        .unwrap();

    let (found, _) = ctx
        .coordinator
        .latest_open_for_table(&table)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, order.id);

    // Missing table is a 404, not an empty result
    let err = ctx
        .coordinator
        .latest_open_for_table("dining_table:404")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ========================================================================
// 并发: the open-table race
// ========================================================================

#[tokio::test]
async fn concurrent_openers_of_one_table_serialize() {
    use std::sync::Arc;

    let svc = DbService::new_in_memory().await.unwrap();
    let coordinator = Arc::new(OrderCoordinator::new(svc.db.clone()));
    let tables = DiningTableRepository::new(svc.db.clone());

    let table = tables
        .create(DiningTableCreate {
            name: "Table 1".to_string(),
            location: None,
            seats: None,
            description: None,
        })
        .await
        .unwrap();
    let table_id = table.id.unwrap().to_string();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let coordinator = coordinator.clone();
        let table_id = table_id.clone();
        handles.push(tokio::spawn(async move {
            coordinator
                .create(&test_user(), create_req(Some(table_id.as_str()), vec![]))
                .await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    // Exactly one opener wins, the rest are told the table is taken
    assert_eq!(created, 1);
    assert_eq!(conflicts, 3);
}
