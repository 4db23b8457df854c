//! Bookings API 模块

mod handler;

use axum::{Router, routing::{get, put}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/bookings",
        Router::new()
            .route("/", get(handler::list).post(handler::create))
            .route("/{id}", get(handler::get_by_id))
            .route("/{id}/status", put(handler::update_status)),
    )
}
