//! Booking status state machine

use serde::{Deserialize, Serialize};

/// 预订状态
///
/// `CheckedOut` 和 `Cancelled` 为终态。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// 已确认 - 创建时的初始状态
    #[default]
    Confirmed,
    /// 已入住
    CheckedIn,
    /// 已退房 (终态)
    CheckedOut,
    /// 已取消 (终态)
    Cancelled,
}

impl BookingStatus {
    /// Terminal states have no outgoing edges
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    /// Whether `target` is reachable from this status in one step
    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        matches!(
            (self, target),
            (Self::Confirmed, Self::CheckedIn)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::CheckedIn, Self::CheckedOut)
                | (Self::CheckedIn, Self::Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 支付方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// 现金 - 未指定时的默认值
    #[default]
    Cash,
    Card,
    BankTransfer,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::BankTransfer => "bank_transfer",
            Self::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_graph() {
        use BookingStatus::*;

        assert!(Confirmed.can_transition_to(CheckedIn));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(CheckedIn.can_transition_to(CheckedOut));
        assert!(CheckedIn.can_transition_to(Cancelled));

        // Skipping check-in is not allowed
        assert!(!Confirmed.can_transition_to(CheckedOut));
        // No backwards edges
        assert!(!CheckedIn.can_transition_to(Confirmed));
        // Self transitions are not edges
        assert!(!Confirmed.can_transition_to(Confirmed));
    }

    #[test]
    fn test_terminal_states_have_no_outgoing_edges() {
        use BookingStatus::*;

        for terminal in [CheckedOut, Cancelled] {
            assert!(terminal.is_terminal());
            for target in [Confirmed, CheckedIn, CheckedOut, Cancelled] {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn test_status_serde_wire_format() {
        let json = serde_json::to_string(&BookingStatus::CheckedIn).unwrap();
        assert_eq!(json, "\"checked_in\"");

        let parsed: BookingStatus = serde_json::from_str("\"checked_out\"").unwrap();
        assert_eq!(parsed, BookingStatus::CheckedOut);
    }
}
