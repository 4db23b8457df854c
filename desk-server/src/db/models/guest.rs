//! Guest Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Guest entity (住客档案)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    /// Identity document reference (passport / ID card number)
    #[serde(default)]
    pub id_proof: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Create guest payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub id_proof: String,
}
