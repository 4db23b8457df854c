//! Shared types for the front-desk server
//!
//! Common types used across crates: the unified error type, the API
//! response envelope, and client-facing auth DTOs.

pub mod client;
pub mod error;
pub mod response;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use response::ApiResponse;

/// Current Unix timestamp in milliseconds
pub fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
