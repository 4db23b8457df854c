//! Room API Handlers

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bookings::{BookingStatus, stay_covers};
use crate::core::ServerState;
use crate::db::models::{Room, RoomCreate, RoomOccupancy, RoomType, RoomUpdate};
use crate::db::repository::{BookingRepository, RoomRepository};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "room";

/// GET /api/rooms - 获取所有客房
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let repo = RoomRepository::new(state.get_db());
    let rooms = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(rooms))
}

/// GET /api/rooms/:id - 获取单个客房
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Room>> {
    let repo = RoomRepository::new(state.get_db());
    let room = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Room {}", id)))?;
    Ok(Json(room))
}

fn validate_room_fields(
    room_number: &str,
    price_per_night: f64,
    max_occupancy: i32,
) -> AppResult<()> {
    validate_required_text(room_number, "room_number", MAX_NAME_LEN)?;
    if !price_per_night.is_finite() || price_per_night <= 0.0 {
        return Err(AppError::validation(format!(
            "price_per_night must be positive, got {}",
            price_per_night
        )));
    }
    if max_occupancy < 1 {
        return Err(AppError::validation(format!(
            "max_occupancy must be at least 1, got {}",
            max_occupancy
        )));
    }
    Ok(())
}

/// POST /api/rooms - 创建客房
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<Room>> {
    validate_room_fields(
        &payload.room_number,
        payload.price_per_night,
        payload.max_occupancy,
    )?;
    if payload.description.len() > MAX_NOTE_LEN {
        return Err(AppError::validation("description is too long"));
    }

    let repo = RoomRepository::new(state.get_db());
    let room = repo.create(payload).await.map_err(AppError::from)?;

    let id = room.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.publish_change(RESOURCE, "created", &id);

    Ok(Json(room))
}

/// PUT /api/rooms/:id - 更新客房
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<Room>> {
    if let Some(number) = &payload.room_number {
        validate_required_text(number, "room_number", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price_per_night
        && (!price.is_finite() || price <= 0.0)
    {
        return Err(AppError::validation(format!(
            "price_per_night must be positive, got {}",
            price
        )));
    }

    let repo = RoomRepository::new(state.get_db());
    let room = repo.update(&id, payload).await.map_err(AppError::from)?;

    state.publish_change(RESOURCE, "updated", &id);

    Ok(Json(room))
}

/// DELETE /api/rooms/:id - 下架客房 (软删除，历史预订保留引用)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = RoomRepository::new(state.get_db());
    let result = repo.delete(&id).await.map_err(AppError::from)?;

    if result {
        state.publish_change(RESOURCE, "deleted", &id);
    }

    Ok(Json(result))
}

// ============================================================================
// Availability
// ============================================================================

/// Wire format of `POST /api/rooms/availability`
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub room_type: Option<RoomType>,
}

/// POST /api/rooms/availability - 按日期区间查询可订客房
///
/// 半开区间语义：同日退房/入住的背靠背预订不冲突。
pub async fn availability(
    State(state): State<ServerState>,
    Json(query): Json<AvailabilityQuery>,
) -> AppResult<Json<Vec<Room>>> {
    if query.check_out <= query.check_in {
        return Err(AppError::validation(
            "check_out must be after check_in".to_string(),
        ));
    }

    let rooms = RoomRepository::new(state.get_db())
        .find_active(query.room_type)
        .await
        .map_err(AppError::from)?;

    let occupied: HashSet<String> = BookingRepository::new(state.get_db())
        .occupied_room_ids(query.check_in, query.check_out)
        .await
        .map_err(AppError::from)?
        .into_iter()
        .map(|id| id.to_string())
        .collect();

    let available: Vec<Room> = rooms
        .into_iter()
        .filter(|room| {
            room.id
                .as_ref()
                .map(|id| !occupied.contains(&id.to_string()))
                .unwrap_or(false)
        })
        .collect();

    Ok(Json(available))
}

// ============================================================================
// Room status board
// ============================================================================

/// One room with its derived occupancy for today
#[derive(Debug, Serialize)]
pub struct RoomStatusEntry {
    #[serde(flatten)]
    pub room: Room,
    pub occupancy: RoomOccupancy,
}

/// GET /api/rooms/status (also /api/dashboard/room-status)
///
/// 按业务时区的今天推导每间客房的占用状态:
/// checked_in 覆盖今天 → occupied；confirmed 覆盖今天 → reserved。
pub async fn room_status(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<RoomStatusEntry>>> {
    let today = state.today();

    let rooms = RoomRepository::new(state.get_db())
        .find_all()
        .await
        .map_err(AppError::from)?;
    let active = BookingRepository::new(state.get_db())
        .active_on(today)
        .await
        .map_err(AppError::from)?;

    let entries = rooms
        .into_iter()
        .map(|room| {
            let room_id = room.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
            let mut occupancy = RoomOccupancy::Available;
            for booking in active.iter().filter(|b| b.room.to_string() == room_id) {
                if !stay_covers(booking.check_in, booking.check_out, today) {
                    continue;
                }
                match booking.status {
                    BookingStatus::CheckedIn => {
                        occupancy = RoomOccupancy::Occupied;
                        break;
                    }
                    BookingStatus::Confirmed => occupancy = RoomOccupancy::Reserved,
                    _ => {}
                }
            }
            RoomStatusEntry { room, occupancy }
        })
        .collect();

    Ok(Json(entries))
}
