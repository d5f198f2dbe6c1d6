//! Order API Handlers
//!
//! Thin layer over the order coordinator; all lifecycle rules live
//! there.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{InvoiceView, OrderView};

use crate::api::convert;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::{OrderCreateRequest, OrderUpdateRequest, SettleRequest};
use crate::utils::AppResult;

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/orders - list orders, most recent first (without lines)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderView>>> {
    let orders = state.orders.list(query.limit, query.offset).await?;
    Ok(Json(orders.iter().map(convert::order_summary_view).collect()))
}

/// GET /api/orders/{id} - one order with its lines
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderView>> {
    let (order, details) = state.orders.get(&id).await?;
    Ok(Json(convert::order_view(&order, &details)))
}

/// POST /api/orders - open a new order
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreateRequest>,
) -> AppResult<(StatusCode, Json<OrderView>)> {
    let (order, details) = state.orders.create(&user, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(convert::order_view(&order, &details)),
    ))
}

/// PUT /api/orders/{id} - update status, note, table and lines
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdateRequest>,
) -> AppResult<Json<OrderView>> {
    let (order, details) = state.orders.update(&user, &id, payload).await?;
    Ok(Json(convert::order_view(&order, &details)))
}

/// DELETE /api/orders/{id} - cancel an order, releasing its table
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.orders.delete(&id).await?;
    Ok(StatusCode::OK)
}

/// POST /api/orders/{id}/settle - issue the invoice and close the order
pub async fn settle(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<SettleRequest>,
) -> AppResult<(StatusCode, Json<InvoiceView>)> {
    let invoice = state.orders.settle(&user, &id, payload).await?;
    Ok((StatusCode::CREATED, Json(convert::invoice_view(&invoice))))
}
