//! Invoice API Handlers
//!
//! Read-only: invoices are written exclusively by order settlement.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::InvoiceView;

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::InvoiceRepository;
use crate::utils::{AppError, AppResult};

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

/// GET /api/invoices - list invoices, most recent first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<InvoiceView>>> {
    let repo = InvoiceRepository::new(state.db.clone());
    let invoices = repo.find_all(query.limit, query.offset).await?;
    Ok(Json(invoices.iter().map(convert::invoice_view).collect()))
}

/// GET /api/invoices/{id} - one invoice
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<InvoiceView>> {
    let repo = InvoiceRepository::new(state.db.clone());
    let invoice = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Invoice {} not found", id)))?;
    Ok(Json(convert::invoice_view(&invoice)))
}
