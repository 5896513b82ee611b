//! Shared rounding helpers for advisory calculations.
//!
//! Money is reported in whole currency units, percentages at one decimal
//! place, and yields/volumes at two. All rounding is half-up (midpoint away
//! from zero).

use rust_decimal::Decimal;

/// Rounds to a whole number using half-up rounding.
///
/// Used for scaled cost components and water volumes in mm.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use agro_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(2.4)), dec!(2));
/// assert_eq!(round_whole(dec!(2.5)), dec!(3));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to one decimal place using half-up rounding.
///
/// Used for percentages (profit margin, ROI, price change) and the daily
/// water requirement.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use agro_core::calculations::common::round_dp1;
///
/// assert_eq!(round_dp1(dec!(71.14)), dec!(71.1));
/// assert_eq!(round_dp1(dec!(71.15)), dec!(71.2));
/// ```
pub fn round_dp1(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to two decimal places using half-up rounding.
///
/// Used for yields in tons and irrigation volumes in m³/hours.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use agro_core::calculations::common::round_dp2;
///
/// assert_eq!(round_dp2(dec!(1.275)), dec!(1.28));
/// assert_eq!(round_dp2(dec!(1.274)), dec!(1.27));
/// ```
pub fn round_dp2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_whole tests
    // =========================================================================

    #[test]
    fn round_whole_rounds_down_below_midpoint() {
        assert_eq!(round_whole(dec!(145.4)), dec!(145));
    }

    #[test]
    fn round_whole_rounds_up_at_midpoint() {
        assert_eq!(round_whole(dec!(145.5)), dec!(146));
    }

    #[test]
    fn round_whole_preserves_integers() {
        assert_eq!(round_whole(dec!(5000)), dec!(5000));
    }

    #[test]
    fn round_whole_rounds_negative_away_from_zero() {
        assert_eq!(round_whole(dec!(-1.5)), dec!(-2));
    }

    // =========================================================================
    // round_dp1 tests
    // =========================================================================

    #[test]
    fn round_dp1_rounds_half_up() {
        assert_eq!(round_dp1(dec!(5.95)), dec!(6.0));
    }

    #[test]
    fn round_dp1_handles_zero() {
        assert_eq!(round_dp1(dec!(0)), dec!(0));
    }

    // =========================================================================
    // round_dp2 tests
    // =========================================================================

    #[test]
    fn round_dp2_rounds_half_up() {
        assert_eq!(round_dp2(dec!(2.605)), dec!(2.61));
    }

    #[test]
    fn round_dp2_preserves_already_rounded_values() {
        assert_eq!(round_dp2(dec!(2.60)), dec!(2.60));
    }
}
