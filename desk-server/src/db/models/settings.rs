//! Settings Model (Singleton)

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Hotel settings — singleton record `settings:main`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub hotel_name: String,
    pub currency_code: String,
    /// Informational HH:MM strings shown to the operator
    pub check_in_time: String,
    pub check_out_time: String,
    #[serde(default)]
    pub updated_at: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: None,
            hotel_name: "Hotel".to_string(),
            currency_code: "EUR".to_string(),
            check_in_time: "14:00".to_string(),
            check_out_time: "11:00".to_string(),
            updated_at: 0,
        }
    }
}

/// Update settings payload (merge semantics)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<String>,
}
