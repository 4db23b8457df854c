//! Expenses API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/expenses",
        Router::new().route("/", get(handler::list).post(handler::create)),
    )
}
