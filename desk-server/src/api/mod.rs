//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录和当前用户接口
//! - [`rooms`] - 客房管理接口 (含可用性查询)
//! - [`guests`] - 住客档案接口
//! - [`bookings`] - 预订管理接口 (含状态转换)
//! - [`expenses`] - 支出记录接口
//! - [`sales`] - 营收记录接口
//! - [`settings`] - 酒店设置接口
//! - [`dashboard`] - 前台总览接口

pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod expenses;
pub mod guests;
pub mod health;
pub mod rooms;
pub mod sales;
pub mod settings;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// 组装完整路由
///
/// 认证中间件覆盖所有 `/api/` 路由 (公共路由在中间件内跳过)。
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(rooms::router())
        .merge(guests::router())
        .merge(bookings::router())
        .merge(expenses::router())
        .merge(sales::router())
        .merge(settings::router())
        .merge(dashboard::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
