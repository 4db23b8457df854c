//! Expense Model

use super::serde_helpers;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Expense entity (支出记录)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    /// Admin id that recorded the expense (from the bearer token)
    pub created_by: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCreate {
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}
