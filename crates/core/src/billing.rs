//! Call billing arithmetic.
//!
//! All monetary values are `rust_decimal::Decimal` (stored as NUMERIC).
//! Costs are rounded to two decimal places with half-up rounding, so the
//! charge for 3.333 minutes at 25.00/min is 83.33, not 83.32.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on monetary amounts (paise precision).
pub const MONEY_SCALE: u32 = 2;

/// Compute the total cost of a call: `duration_minutes * per_minute_charge`,
/// rounded half-up to [`MONEY_SCALE`] decimal places.
pub fn call_cost(duration_minutes: Decimal, per_minute_charge: Decimal) -> Decimal {
    (duration_minutes * per_minute_charge)
        .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a raw amount to the platform's money scale, half-up.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal literal")
    }

    #[test]
    fn test_fractional_minutes_round_half_up() {
        // 3.333 * 25 = 83.325 -> half-up -> 83.33
        assert_eq!(call_cost(dec("3.333"), dec("25")), dec("83.33"));
    }

    #[test]
    fn test_whole_minutes_exact() {
        assert_eq!(call_cost(dec("10"), dec("25")), dec("250.00"));
    }

    #[test]
    fn test_zero_duration_costs_nothing() {
        assert_eq!(call_cost(dec("0"), dec("50")), dec("0.00"));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        // 0.5 * 0.05 = 0.025 -> 0.03
        assert_eq!(call_cost(dec("0.5"), dec("0.05")), dec("0.03"));
    }

    #[test]
    fn test_round_money_truncates_excess_scale() {
        assert_eq!(round_money(dec("12.345")), dec("12.35"));
        assert_eq!(round_money(dec("12.344")), dec("12.34"));
    }
}
