//! Dashboard API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/dashboard",
        Router::new()
            .route("/stats", get(handler::stats))
            .route("/room-status", get(crate::api::rooms::room_status)),
    )
}
