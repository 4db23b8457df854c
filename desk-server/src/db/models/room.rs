//! Room Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Room type (房型)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Deluxe,
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Suite => "suite",
            Self::Deluxe => "deluxe",
        };
        write!(f, "{}", s)
    }
}

/// Derived occupancy status for the current business date.
///
/// Never stored — computed from active bookings overlapping today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoomOccupancy {
    Available,
    Occupied,
    Reserved,
}

/// Room entity (客房)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub room_number: String,
    pub room_type: RoomType,
    pub price_per_night: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub max_occupancy: i32,
    #[serde(default)]
    pub description: String,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub room_number: String,
    pub room_type: RoomType,
    pub price_per_night: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub max_occupancy: i32,
    #[serde(default)]
    pub description: String,
}

/// Update room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_occupancy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
