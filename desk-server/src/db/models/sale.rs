//! Sale Model

use super::serde_helpers;
use crate::bookings::PaymentMethod;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Sale record (营收记录)
///
/// Written by the check-out transition for the total owed; never
/// created or edited directly through the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub booking: RecordId,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub date: NaiveDate,
    #[serde(default)]
    pub created_at: i64,
}
