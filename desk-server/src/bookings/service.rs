//! 状态转换服务 — 按预订串行化的读-算-写循环
//!
//! 两个并发的退房请求若各自从同一个旧的 advance_payment 出发计算
//! balance_due，后写的会覆盖先写的 ("lost update")。因此每个预订 ID
//! 持有一把互斥锁，读取、纯计算、持久化都在锁内完成。

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use super::transition::{TransitionError, TransitionRequest, apply_transition};
use crate::core::ChangeFeed;
use crate::db::models::Booking;
use crate::db::repository::BookingRepository;
use crate::utils::{AppError, AppResult};

/// Response of `PUT /api/bookings/{id}/status`
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub booking: Booking,
    /// Present only when the transition was a check-out; negative means
    /// a refund is owed to the guest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_due: Option<f64>,
}

/// Booking status controller — validates, computes, persists
pub struct TransitionService {
    bookings: BookingRepository,
    changes: Arc<ChangeFeed>,
    /// Per-booking mutexes; entries are cheap and never reaped
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl TransitionService {
    pub fn new(db: Surreal<Db>, changes: Arc<ChangeFeed>) -> Self {
        Self {
            bookings: BookingRepository::new(db),
            changes,
            locks: DashMap::new(),
        }
    }

    /// Apply a transition request to one booking.
    ///
    /// `today` (hotel business timezone) becomes the date of the sale
    /// record when the transition is a check-out.
    pub async fn apply(
        &self,
        booking_id: &str,
        request: TransitionRequest,
        today: NaiveDate,
    ) -> AppResult<TransitionResponse> {
        let lock = self
            .locks
            .entry(booking_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("Booking {}", booking_id)))?;

        let from_status = booking.status;
        let outcome = apply_transition(&booking, request.status, &request.payment)
            .map_err(transition_error_to_app)?;
        let balance_due = outcome.bill.as_ref().map(|b| b.balance_due);

        let (updated, sale) = self
            .bookings
            .apply_transition(booking_id, &outcome, today)
            .await
            .map_err(AppError::from)?;

        let booking_ref = updated
            .id
            .as_ref()
            .map(|t| t.to_string())
            .unwrap_or_else(|| booking_id.to_string());
        self.changes.publish("booking", "updated", &booking_ref);
        if let Some(sale) = &sale {
            let sale_ref = sale.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
            self.changes.publish("sale", "created", &sale_ref);
        }

        tracing::info!(
            booking = %booking_ref,
            from = %from_status,
            to = %updated.status,
            balance_due = ?balance_due,
            "Booking status updated"
        );

        Ok(TransitionResponse {
            booking: updated,
            balance_due,
        })
    }
}

/// Map core rejections to the API error taxonomy
///
/// Transition-graph violations are business-rule rejections (422);
/// bad currency fields are validation errors (400). Nothing is masked —
/// the operator sees the rejection verbatim.
fn transition_error_to_app(err: TransitionError) -> AppError {
    match err {
        TransitionError::TerminalState { .. } | TransitionError::InvalidTransition { .. } => {
            AppError::business_rule(err.to_string())
        }
        TransitionError::NegativeAmount { .. } | TransitionError::InvalidAmount { .. } => {
            AppError::validation(err.to_string())
        }
    }
}
