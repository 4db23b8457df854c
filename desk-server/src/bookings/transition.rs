//! 预订状态转换 — 纯校验与账务推导
//!
//! [`apply_transition`] 不做任何 I/O：输入当前预订和操作员请求，
//! 输出应持久化的结果或被拒绝的原因。持久化与并发控制见 [`super::service`]。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::money::{MAX_AMOUNT, to_decimal, to_f64};
use super::status::{BookingStatus, PaymentMethod};
use crate::db::models::Booking;

/// Operator-supplied payment fields accompanying a transition request.
///
/// Every field is optional; irrelevant fields for the requested target
/// are validated (rule 3) but otherwise ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentFields {
    /// Extra charges settled at check-out (minibar, late fees, ...)
    #[serde(default)]
    pub additional_charges: Option<f64>,
    /// Advance collected at check-in, added to the booking's advance
    #[serde(default)]
    pub advance_payment_received: Option<f64>,
    /// How the balance is settled at check-out; defaults to cash
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    /// Free-text operator note, written verbatim on any transition
    #[serde(default)]
    pub notes: Option<String>,
}

impl PaymentFields {
    pub fn additional_charges(&self) -> f64 {
        self.additional_charges.unwrap_or(0.0)
    }

    pub fn advance_payment_received(&self) -> f64 {
        self.advance_payment_received.unwrap_or(0.0)
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method.unwrap_or_default()
    }
}

/// Wire format of `PUT /api/bookings/{id}/status`
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRequest {
    pub status: BookingStatus,
    #[serde(flatten)]
    pub payment: PaymentFields,
}

/// Rejection reasons, in validation order (first failure wins)
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    /// Rule 1: the booking is already in a terminal state
    #[error("booking is already {status} and cannot change status")]
    TerminalState { status: BookingStatus },

    /// Rule 2: the target is not reachable in the transition graph
    #[error("cannot transition from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Rule 3: a currency field is negative
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    /// Rule 3: a currency field is NaN/infinite or beyond the cap
    #[error("{field} is not a valid amount")]
    InvalidAmount { field: &'static str },
}

/// Billing reconciliation produced by a check-out transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutBill {
    /// base total + additional charges
    pub total_owed: f64,
    /// advance collected so far (booking-time + check-in top-ups)
    pub amount_paid: f64,
    /// total_owed − amount_paid; negative means a refund is owed
    pub balance_due: f64,
    pub payment_method: PaymentMethod,
}

/// The state a successful transition asks the entity store to persist
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    pub status: BookingStatus,
    pub advance_payment: f64,
    pub notes: Option<String>,
    /// Present only when transitioning to `checked_out`; also the source
    /// of the generated sale record
    pub bill: Option<CheckoutBill>,
}

fn validate_amount(value: f64, field: &'static str) -> Result<(), TransitionError> {
    if !value.is_finite() || value > MAX_AMOUNT {
        return Err(TransitionError::InvalidAmount { field });
    }
    if value < 0.0 {
        return Err(TransitionError::NegativeAmount { field, value });
    }
    Ok(())
}

/// Validate a requested status transition and compute the derived
/// monetary fields.
///
/// Validation order (first failure wins):
/// 1. terminal-state check
/// 2. reachability in the transition graph
/// 3. currency fields non-negative
///
/// No partial results: a rejection leaves nothing to persist.
pub fn apply_transition(
    booking: &Booking,
    requested: BookingStatus,
    fields: &PaymentFields,
) -> Result<TransitionOutcome, TransitionError> {
    // 1. Terminal states reject everything, including replays of the
    //    transition that put them there
    if booking.status.is_terminal() {
        return Err(TransitionError::TerminalState {
            status: booking.status,
        });
    }

    // 2. Reachability
    if !booking.status.can_transition_to(requested) {
        return Err(TransitionError::InvalidTransition {
            from: booking.status,
            to: requested,
        });
    }

    // 3. Currency fields, relevant or not
    validate_amount(fields.additional_charges(), "additional_charges")?;
    validate_amount(
        fields.advance_payment_received(),
        "advance_payment_received",
    )?;

    let advance = to_decimal(booking.advance_payment);

    match requested {
        BookingStatus::CheckedIn => {
            let new_advance = advance + to_decimal(fields.advance_payment_received());
            Ok(TransitionOutcome {
                status: requested,
                advance_payment: to_f64(new_advance),
                notes: fields.notes.clone(),
                bill: None,
            })
        }
        BookingStatus::CheckedOut => {
            let total_owed = to_decimal(booking.total_amount)
                + to_decimal(fields.additional_charges());
            // 溢缴保留符号，不截断为零 — 用于提示应退款
            let balance_due = total_owed - advance;
            Ok(TransitionOutcome {
                status: requested,
                advance_payment: booking.advance_payment,
                notes: fields.notes.clone(),
                bill: Some(CheckoutBill {
                    total_owed: to_f64(total_owed),
                    amount_paid: to_f64(advance),
                    balance_due: to_f64(balance_due),
                    payment_method: fields.payment_method(),
                }),
            })
        }
        BookingStatus::Cancelled => {
            // No monetary recomputation; the advance stays on the record
            Ok(TransitionOutcome {
                status: requested,
                advance_payment: booking.advance_payment,
                notes: fields.notes.clone(),
                bill: None,
            })
        }
        // Unreachable: `confirmed` is never a transition target
        BookingStatus::Confirmed => Err(TransitionError::InvalidTransition {
            from: booking.status,
            to: requested,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_booking(status: BookingStatus, total_amount: f64, advance_payment: f64) -> Booking {
        Booking {
            id: None,
            room: "room:r101".parse().unwrap(),
            guest: "guest:g1".parse().unwrap(),
            check_in: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
            guests_count: 2,
            special_requests: String::new(),
            total_amount,
            advance_payment,
            status,
            notes: None,
            balance_due: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_check_in_without_payment_keeps_advance() {
        let booking = test_booking(BookingStatus::Confirmed, 200.0, 80.0);

        let outcome =
            apply_transition(&booking, BookingStatus::CheckedIn, &PaymentFields::default())
                .unwrap();

        assert_eq!(outcome.status, BookingStatus::CheckedIn);
        assert_eq!(outcome.advance_payment, 80.0);
        assert!(outcome.bill.is_none());
    }

    #[test]
    fn test_check_in_accumulates_advance() {
        let booking = test_booking(BookingStatus::Confirmed, 200.0, 20.0);
        let fields = PaymentFields {
            advance_payment_received: Some(30.0),
            ..Default::default()
        };

        let outcome = apply_transition(&booking, BookingStatus::CheckedIn, &fields).unwrap();

        assert_eq!(outcome.advance_payment, 50.0);
    }

    #[test]
    fn test_checkout_balance_due() {
        let booking = test_booking(BookingStatus::CheckedIn, 200.0, 80.0);
        let fields = PaymentFields {
            additional_charges: Some(50.0),
            ..Default::default()
        };

        let outcome = apply_transition(&booking, BookingStatus::CheckedOut, &fields).unwrap();
        let bill = outcome.bill.unwrap();

        assert_eq!(bill.total_owed, 250.0);
        assert_eq!(bill.amount_paid, 80.0);
        assert_eq!(bill.balance_due, 170.0);
        // Absent payment method defaults to cash
        assert_eq!(bill.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_checkout_overpayment_keeps_sign() {
        let booking = test_booking(BookingStatus::CheckedIn, 100.0, 150.0);

        let outcome = apply_transition(
            &booking,
            BookingStatus::CheckedOut,
            &PaymentFields::default(),
        )
        .unwrap();

        // Refund owed: the negative balance is reported, not clamped
        assert_eq!(outcome.bill.unwrap().balance_due, -50.0);
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for terminal in [BookingStatus::CheckedOut, BookingStatus::Cancelled] {
            let booking = test_booking(terminal, 200.0, 80.0);
            for target in [
                BookingStatus::Confirmed,
                BookingStatus::CheckedIn,
                BookingStatus::CheckedOut,
                BookingStatus::Cancelled,
            ] {
                let err = apply_transition(&booking, target, &PaymentFields::default())
                    .unwrap_err();
                assert_eq!(err, TransitionError::TerminalState { status: terminal });
            }
        }
    }

    #[test]
    fn test_checkout_replay_is_rejected_not_recomputed() {
        // A second check-out must not double-charge: the first one made the
        // booking terminal, so the replay dies at rule 1.
        let booking = test_booking(BookingStatus::CheckedOut, 200.0, 80.0);
        let fields = PaymentFields {
            additional_charges: Some(50.0),
            ..Default::default()
        };

        let err = apply_transition(&booking, BookingStatus::CheckedOut, &fields).unwrap_err();
        assert!(matches!(err, TransitionError::TerminalState { .. }));
    }

    #[test]
    fn test_skipping_check_in_is_rejected() {
        let booking = test_booking(BookingStatus::Confirmed, 200.0, 0.0);

        let err = apply_transition(
            &booking,
            BookingStatus::CheckedOut,
            &PaymentFields::default(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: BookingStatus::Confirmed,
                to: BookingStatus::CheckedOut,
            }
        );
    }

    #[test]
    fn test_negative_charges_rejected_before_any_computation() {
        let booking = test_booking(BookingStatus::CheckedIn, 200.0, 80.0);
        let fields = PaymentFields {
            additional_charges: Some(-10.0),
            ..Default::default()
        };

        let err = apply_transition(&booking, BookingStatus::CheckedOut, &fields).unwrap_err();
        assert_eq!(
            err,
            TransitionError::NegativeAmount {
                field: "additional_charges",
                value: -10.0,
            }
        );
    }

    #[test]
    fn test_negative_amount_rejected_even_when_irrelevant() {
        // Rule 3 applies to every currency field regardless of the target
        let booking = test_booking(BookingStatus::Confirmed, 200.0, 0.0);
        let fields = PaymentFields {
            advance_payment_received: Some(-5.0),
            ..Default::default()
        };

        let err = apply_transition(&booking, BookingStatus::Cancelled, &fields).unwrap_err();
        assert!(matches!(err, TransitionError::NegativeAmount { .. }));
    }

    #[test]
    fn test_terminal_check_wins_over_bad_amount() {
        // Validation order: rule 1 fires before rule 3
        let booking = test_booking(BookingStatus::Cancelled, 200.0, 0.0);
        let fields = PaymentFields {
            additional_charges: Some(-10.0),
            ..Default::default()
        };

        let err = apply_transition(&booking, BookingStatus::CheckedOut, &fields).unwrap_err();
        assert!(matches!(err, TransitionError::TerminalState { .. }));
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        let booking = test_booking(BookingStatus::CheckedIn, 200.0, 80.0);
        let fields = PaymentFields {
            additional_charges: Some(f64::NAN),
            ..Default::default()
        };

        let err = apply_transition(&booking, BookingStatus::CheckedOut, &fields).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidAmount {
                field: "additional_charges",
            }
        );
    }

    #[test]
    fn test_cancellation_retains_advance() {
        let booking = test_booking(BookingStatus::CheckedIn, 200.0, 80.0);

        let outcome = apply_transition(
            &booking,
            BookingStatus::Cancelled,
            &PaymentFields::default(),
        )
        .unwrap();

        assert_eq!(outcome.status, BookingStatus::Cancelled);
        assert_eq!(outcome.advance_payment, 80.0);
        assert!(outcome.bill.is_none());
    }

    #[test]
    fn test_notes_written_verbatim() {
        let booking = test_booking(BookingStatus::Confirmed, 200.0, 0.0);
        let fields = PaymentFields {
            notes: Some("  late arrival, keep key at desk ".to_string()),
            ..Default::default()
        };

        let outcome = apply_transition(&booking, BookingStatus::CheckedIn, &fields).unwrap();
        assert_eq!(
            outcome.notes.as_deref(),
            Some("  late arrival, keep key at desk ")
        );
    }

    #[test]
    fn test_decimal_billing_precision() {
        // 0.1 + 0.2 style float noise must not leak into the bill
        let booking = test_booking(BookingStatus::CheckedIn, 100.10, 0.30);
        let fields = PaymentFields {
            additional_charges: Some(0.20),
            ..Default::default()
        };

        let bill = apply_transition(&booking, BookingStatus::CheckedOut, &fields)
            .unwrap()
            .bill
            .unwrap();

        assert_eq!(bill.total_owed, 100.30);
        assert_eq!(bill.balance_due, 100.00);
    }
}
