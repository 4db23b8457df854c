//! Settings API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::{Settings, SettingsUpdate};
use crate::db::repository::SettingsRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "settings";

/// GET /api/settings - 获取酒店设置 (不存在时按默认值创建)
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<Settings>> {
    let repo = SettingsRepository::new(state.get_db());
    let settings = repo.get_or_create().await.map_err(AppError::from)?;
    Ok(Json(settings))
}

/// PUT /api/settings - 更新酒店设置 (merge 语义)
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SettingsUpdate>,
) -> AppResult<Json<Settings>> {
    validate_optional_text(&payload.hotel_name, "hotel_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.currency_code, "currency_code", MAX_SHORT_TEXT_LEN)?;

    let repo = SettingsRepository::new(state.get_db());
    let settings = repo.update(payload).await.map_err(AppError::from)?;

    state.publish_change(RESOURCE, "updated", "settings:main");

    Ok(Json(settings))
}
