//! Money calculation utilities using rust_decimal for precision
//!
//! All billing arithmetic is done on `Decimal` internally, then converted
//! back to `f64` for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed monetary amount (€1,000,000)
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Convert an f64 to Decimal, falling back to zero for unrepresentable values
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Convert a Decimal back to f64, rounded to 2 decimal places
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp(DECIMAL_PLACES)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round an f64 monetary value through Decimal (2 dp, half-up)
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// nights × price_per_night, computed on Decimal
pub fn stay_total(nights: i64, price_per_night: f64) -> f64 {
    to_f64(Decimal::from(nights) * to_decimal(price_per_night))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(10.005), 10.01);
        assert_eq!(round_money(10.004), 10.0);
        assert_eq!(round_money(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_stay_total() {
        assert_eq!(stay_total(3, 89.99), 269.97);
        // Float multiplication would give 3.3000000000000003 here
        assert_eq!(stay_total(3, 1.1), 3.3);
        assert_eq!(stay_total(0, 100.0), 0.0);
    }
}
