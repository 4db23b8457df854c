//! Auth API 模块

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest(
            "/api/admin",
            Router::new()
                .route("/login", post(handler::login))
                .route("/create", post(handler::create)),
        )
        .nest("/api/auth", Router::new().route("/me", get(handler::me)))
}
