//! Booking Model

use super::serde_helpers;
use crate::bookings::BookingStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Booking entity (预订)
///
/// `total_amount` is computed at creation (nights × price_per_night) and
/// never recomputed; `advance_payment` only grows (check-in top-ups);
/// `balance_due` is set once, by the check-out transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub room: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub guest: RecordId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_guests_count")]
    pub guests_count: i32,
    #[serde(default)]
    pub special_requests: String,
    pub total_amount: f64,
    #[serde(default)]
    pub advance_payment: f64,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_due: Option<f64>,
    #[serde(default)]
    pub created_at: i64,
}

fn default_guests_count() -> i32 {
    1
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub room: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub guest: RecordId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_guests_count")]
    pub guests_count: i32,
    #[serde(default)]
    pub special_requests: String,
    /// Advance collected when the booking is taken (non-negative)
    #[serde(default)]
    pub advance_payment: f64,
}

/// Booking joined with room and guest display fields
///
/// Shape of `GET /api/bookings` items — the front desk list view needs
/// the room number and guest contact without extra round trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingWithDetails {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub room_number: String,
    pub room_type: String,
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default)]
    pub guest_phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests_count: i32,
    #[serde(default)]
    pub special_requests: String,
    pub total_amount: f64,
    #[serde(default)]
    pub advance_payment: f64,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_due: Option<f64>,
    #[serde(default)]
    pub created_at: i64,
}
