//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`tables`] - 桌台管理接口 (含按桌查单)
//! - [`products`] - 商品管理接口
//! - [`orders`] - 订单生命周期接口
//! - [`invoices`] - 发票查询接口

pub mod convert;

pub mod health;
pub mod invoices;
pub mod orders;
pub mod products;
pub mod tables;

use axum::{Router, middleware};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::require_auth;
use crate::core::ServerState;

/// Assemble the full API router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(invoices::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
