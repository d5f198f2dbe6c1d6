//! Dining Table API Handlers
//!
//! Plain CRUD, with two guards tied to the order engine: a table with
//! an open order can neither be deleted nor have its status set
//! manually.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::OrderView;

use crate::api::convert;
use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::db::repository::{DiningTableRepository, OrderRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_all().await?;
    Ok(Json(tables))
}

/// GET /api/tables/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Dining table {} not found", id)))?;
    Ok(Json(table))
}

/// GET /api/tables/{id}/order - 该桌台最近一张未结账订单
///
/// Free table returns `null`, only a missing table is 404.
pub async fn open_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Option<OrderView>>> {
    let result = state.orders.latest_open_for_table(&id).await?;
    Ok(Json(
        result
            .map(|(order, details)| convert::order_view(&order, &details)),
    ))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.location, "location", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.create(payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/{id} - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.location, "location", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = DiningTableRepository::new(state.db.clone());

    // Occupancy is owned by the order engine while an order is open
    if payload.status.is_some() && table_has_open_order(&state, &id).await? {
        return Err(AppError::conflict(
            "Table status is managed by its open order",
        ));
    }

    let table = repo.update(&id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id} - 删除桌台
///
/// Refused while an open order references the table.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = DiningTableRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Dining table {} not found", id)))?;

    if table_has_open_order(&state, &id).await? {
        return Err(AppError::conflict(
            "Table cannot be deleted while it has an open order",
        ));
    }

    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

async fn table_has_open_order(state: &ServerState, id: &str) -> AppResult<bool> {
    let rid: surrealdb::RecordId = id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid table ID: {}", id)))?;
    let orders = OrderRepository::new(state.db.clone());
    Ok(orders.has_open_order_for_table(&rid, None).await?)
}
