//! 预订生命周期模块
//!
//! # 结构
//!
//! - [`status`] - 预订状态机 (状态图、终态判定)
//! - [`money`] - 金额精确计算 (rust_decimal)
//! - [`transition`] - 纯转换逻辑: 校验 + 账务推导
//! - [`service`] - 按预订串行化的持久化服务
//!
//! 状态图 (终态无出边):
//!
//! ```text
//! confirmed --check_in--> checked_in
//! confirmed --cancel----> cancelled
//! checked_in --check_out-> checked_out
//! checked_in --cancel----> cancelled
//! ```

pub mod money;
pub mod service;
pub mod status;
pub mod transition;

pub use service::TransitionService;
pub use status::{BookingStatus, PaymentMethod};
pub use transition::{
    CheckoutBill, PaymentFields, TransitionError, TransitionOutcome, TransitionRequest,
    apply_transition,
};

use chrono::NaiveDate;

/// Half-open interval overlap between two stays.
///
/// `[a_in, a_out)` vs `[b_in, b_out)` — a check-out and a check-in on
/// the same day do not conflict (back-to-back stays are allowed).
pub fn dates_overlap(
    a_in: NaiveDate,
    a_out: NaiveDate,
    b_in: NaiveDate,
    b_out: NaiveDate,
) -> bool {
    a_in < b_out && a_out > b_in
}

/// A date falls inside a stay window (same half-open semantics).
pub fn stay_covers(check_in: NaiveDate, check_out: NaiveDate, date: NaiveDate) -> bool {
    check_in <= date && date < check_out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_overlapping_stays() {
        // 2024-05-10..12 vs 2024-05-11..13 share the night of the 11th
        assert!(dates_overlap(
            d(2024, 5, 10),
            d(2024, 5, 12),
            d(2024, 5, 11),
            d(2024, 5, 13)
        ));
        // Full containment
        assert!(dates_overlap(
            d(2024, 5, 1),
            d(2024, 5, 31),
            d(2024, 5, 10),
            d(2024, 5, 12)
        ));
    }

    #[test]
    fn test_back_to_back_stays_do_not_overlap() {
        // Existing stay checks out the day the new one checks in
        assert!(!dates_overlap(
            d(2024, 5, 10),
            d(2024, 5, 12),
            d(2024, 5, 8),
            d(2024, 5, 10)
        ));
        // And the symmetric case
        assert!(!dates_overlap(
            d(2024, 5, 8),
            d(2024, 5, 10),
            d(2024, 5, 10),
            d(2024, 5, 12)
        ));
    }

    #[test]
    fn test_stay_covers() {
        assert!(stay_covers(d(2024, 5, 10), d(2024, 5, 12), d(2024, 5, 10)));
        assert!(stay_covers(d(2024, 5, 10), d(2024, 5, 12), d(2024, 5, 11)));
        // Check-out day is not a stay night
        assert!(!stay_covers(d(2024, 5, 10), d(2024, 5, 12), d(2024, 5, 12)));
    }
}
