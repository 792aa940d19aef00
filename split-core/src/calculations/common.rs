//! Common utility functions for money arithmetic.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use split_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2.664)), dec!(2.66));
/// assert_eq!(round_half_up(dec!(2.665)), dec!(2.67));
/// assert_eq!(round_half_up(dec!(2.666)), dec!(2.67));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value up to the next whole currency unit.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use split_core::calculations::common::ceil_whole;
///
/// assert_eq!(ceil_whole(dec!(20.01)), dec!(21));
/// assert_eq!(ceil_whole(dec!(21)), dec!(21));
/// ```
pub fn ceil_whole(value: Decimal) -> Decimal {
    value.ceil()
}

/// Clamps a value to zero when negative.
///
/// Validated inputs cannot produce negative amounts, but every engine output
/// passes through this floor anyway.
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    if value > Decimal::ZERO { value } else { Decimal::ZERO }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(12.344));

        assert_eq!(result, dec!(12.34));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(12.345));

        assert_eq!(result, dec!(12.35));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        let result = round_half_up(dec!(12.34));

        assert_eq!(result, dec!(12.34));
    }

    #[test]
    fn ceil_whole_rounds_fractions_up() {
        let result = ceil_whole(dec!(20.8333));

        assert_eq!(result, dec!(21));
    }

    #[test]
    fn ceil_whole_keeps_whole_values() {
        let result = ceil_whole(dec!(30.00));

        assert_eq!(result, dec!(30));
    }

    #[test]
    fn clamp_non_negative_floors_negative_values() {
        let result = clamp_non_negative(dec!(-0.01));

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn clamp_non_negative_passes_positive_values() {
        let result = clamp_non_negative(dec!(5.00));

        assert_eq!(result, dec!(5.00));
    }
}
