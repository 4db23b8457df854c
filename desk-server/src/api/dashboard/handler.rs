//! Dashboard API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::bookings::money::{to_decimal, to_f64};
use crate::core::ServerState;
use crate::db::repository::{BookingRepository, ExpenseRepository, RoomRepository, SaleRepository};
use crate::utils::{AppError, AppResult};

/// Front-desk overview numbers
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_rooms: i64,
    pub occupied_rooms: i64,
    pub available_rooms: i64,
    pub total_bookings: i64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    /// Percentage, 0 when the hotel has no rooms
    pub occupancy_rate: f64,
}

/// GET /api/dashboard/stats - 前台总览
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let today = state.today();
    let db = state.get_db();

    let total_rooms = RoomRepository::new(db.clone())
        .find_all()
        .await
        .map_err(AppError::from)?
        .len() as i64;

    let booking_repo = BookingRepository::new(db.clone());
    let occupied_rooms = booking_repo
        .count_occupied_on(today)
        .await
        .map_err(AppError::from)?;
    let total_bookings = booking_repo.count_all().await.map_err(AppError::from)?;

    let total_revenue = SaleRepository::new(db.clone())
        .sum_amounts()
        .await
        .map_err(AppError::from)?;
    let total_expenses = ExpenseRepository::new(db)
        .sum_amounts()
        .await
        .map_err(AppError::from)?;

    let net_profit = to_f64(to_decimal(total_revenue) - to_decimal(total_expenses));
    let occupancy_rate = if total_rooms > 0 {
        (occupied_rooms as f64 / total_rooms as f64) * 100.0
    } else {
        0.0
    };

    Ok(Json(DashboardStats {
        total_rooms,
        occupied_rooms,
        available_rooms: total_rooms - occupied_rooms,
        total_bookings,
        total_revenue,
        total_expenses,
        net_profit,
        occupancy_rate,
    }))
}
