//! Guest API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Guest, GuestCreate};
use crate::db::repository::GuestRepository;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "guest";

/// GET /api/guests - 获取所有住客档案
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Guest>>> {
    let repo = GuestRepository::new(state.get_db());
    let guests = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(guests))
}

/// GET /api/guests/:id - 获取单个住客
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Guest>> {
    let repo = GuestRepository::new(state.get_db());
    let guest = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Guest {}", id)))?;
    Ok(Json(guest))
}

/// POST /api/guests - 登记住客
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GuestCreate>,
) -> AppResult<Json<Guest>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&Some(payload.phone.clone()), "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&Some(payload.address.clone()), "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&Some(payload.id_proof.clone()), "id_proof", MAX_SHORT_TEXT_LEN)?;

    let repo = GuestRepository::new(state.get_db());
    let guest = repo.create(payload).await.map_err(AppError::from)?;

    let id = guest.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.publish_change(RESOURCE, "created", &id);

    Ok(Json(guest))
}
