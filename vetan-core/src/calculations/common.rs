//! Shared helpers for the calculation code.

use rust_decimal::Decimal;

/// Rounds to two decimal places, half-up (midpoint away from zero), the
/// standard convention for currency amounts.
///
/// ```
/// use rust_decimal_macros::dec;
/// use vetan_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two decimal values.
pub fn max(a: Decimal, b: Decimal) -> Decimal {
    if a > b { a } else { b }
}
