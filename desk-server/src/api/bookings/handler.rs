//! Booking API Handlers
//!
//! 创建走可用性校验 + 房价冻结；状态转换统一走 TransitionService。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::bookings::money::stay_total;
use crate::bookings::service::TransitionResponse;
use crate::bookings::TransitionRequest;
use crate::core::ServerState;
use crate::db::models::{Booking, BookingCreate, BookingWithDetails};
use crate::db::repository::{BookingRepository, GuestRepository, RoomRepository};
use crate::utils::time::nights_between;
use crate::utils::validation::{MAX_NOTE_LEN, validate_amount};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "booking";

/// GET /api/bookings - 预订列表 (含客房/住客展示字段)
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<BookingWithDetails>>> {
    let repo = BookingRepository::new(state.get_db());
    let bookings = repo.find_all_with_details().await.map_err(AppError::from)?;
    Ok(Json(bookings))
}

/// GET /api/bookings/:id - 单个预订 (含展示字段)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookingWithDetails>> {
    let repo = BookingRepository::new(state.get_db());
    let booking = repo
        .find_by_id_with_details(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Booking {}", id)))?;
    Ok(Json(booking))
}

/// POST /api/bookings - 创建预订
///
/// 校验顺序：日期 → 人数/金额 → 客房存在 → 住客存在 → 可用性。
/// 通过后按当前房价冻结 total_amount，以 `confirmed` 状态落库。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    if payload.check_out <= payload.check_in {
        return Err(AppError::validation(
            "check_out must be after check_in".to_string(),
        ));
    }
    if payload.guests_count < 1 {
        return Err(AppError::validation(format!(
            "guests_count must be at least 1, got {}",
            payload.guests_count
        )));
    }
    validate_amount(payload.advance_payment, "advance_payment")?;
    if payload.special_requests.len() > MAX_NOTE_LEN {
        return Err(AppError::validation("special_requests is too long"));
    }

    let room_repo = RoomRepository::new(state.get_db());
    let room = room_repo
        .find_by_id(&payload.room.to_string())
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Room {}", payload.room)))?;

    if !room.is_active {
        return Err(AppError::business_rule(format!(
            "Room {} is no longer available for booking",
            room.room_number
        )));
    }
    if payload.guests_count > room.max_occupancy {
        return Err(AppError::business_rule(format!(
            "Room {} sleeps at most {} guests",
            room.room_number, room.max_occupancy
        )));
    }

    GuestRepository::new(state.get_db())
        .find_by_id(&payload.guest.to_string())
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Guest {}", payload.guest)))?;

    let booking_repo = BookingRepository::new(state.get_db());
    let conflicts = booking_repo
        .conflicts_for_room(&payload.room, payload.check_in, payload.check_out)
        .await
        .map_err(AppError::from)?;
    if !conflicts.is_empty() {
        return Err(AppError::business_rule(
            "Room is not available for the selected dates".to_string(),
        ));
    }

    // 冻结预订时的房价
    let nights = nights_between(payload.check_in, payload.check_out);
    let total_amount = stay_total(nights, room.price_per_night);

    let booking = booking_repo
        .create(payload, total_amount)
        .await
        .map_err(AppError::from)?;

    let id = booking.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.publish_change(RESOURCE, "created", &id);

    tracing::info!(
        booking = %id,
        room = %booking.room,
        nights = nights,
        total_amount = total_amount,
        "Booking created"
    );

    Ok(Json(booking))
}

/// PUT /api/bookings/:id/status - 状态转换
///
/// Body: `{status, additional_charges?, advance_payment_received?,
/// payment_method?, notes?}`。退房时响应携带 `balance_due`。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(request): Json<TransitionRequest>,
) -> AppResult<Json<TransitionResponse>> {
    let response = state.transitions.apply(&id, request, state.today()).await?;
    Ok(Json(response))
}
