//! Common utility functions for tax calculations.
//!
//! Shared by the Box 1 and Box 3 engines: cent rounding, clamping and the
//! defensive normalization applied to user-supplied amounts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

/// Largest amount the engines work with (one quadrillion euro). Every
/// intermediate result stays well inside [`Decimal`]'s range below it.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use nl_tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1462.28544)), dec!(1462.29));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use nl_tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-3800.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps a user-supplied amount to zero when it is negative.
///
/// The engines are driven by live-recalculating front ends where an input
/// may briefly hold an invalid value; such values count as zero instead of
/// failing the calculation. `field` names the input in the log event.
pub fn non_negative(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value < Decimal::ZERO {
        warn!(field, value = %value, "negative amount treated as zero");
        Decimal::ZERO
    } else {
        value
    }
}

/// Caps a user-supplied amount at [`MAX_AMOUNT`].
///
/// ```
/// use rust_decimal::Decimal;
/// use nl_tax_core::calculations::common::{capped, MAX_AMOUNT};
///
/// assert_eq!(capped("bank_balance", Decimal::MAX), MAX_AMOUNT);
/// ```
pub fn capped(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value > MAX_AMOUNT {
        warn!(field, value = %value, "amount above {} capped", MAX_AMOUNT);
        MAX_AMOUNT
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(4061.904)), dec!(4061.90));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_zero() {
        assert_eq!(round_half_up(dec!(0.00)), dec!(0.00));
    }

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_and_zero() {
        assert_eq!(max(dec!(-50.00), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn non_negative_keeps_positive_values() {
        assert_eq!(non_negative("bank_balance", dec!(50000)), dec!(50000));
    }

    #[test]
    fn non_negative_clamps_negative_values() {
        assert_eq!(non_negative("bank_balance", dec!(-1)), Decimal::ZERO);
    }

    #[test]
    fn capped_keeps_ordinary_amounts() {
        assert_eq!(capped("debts", dec!(250000)), dec!(250000));
        assert_eq!(capped("debts", MAX_AMOUNT), MAX_AMOUNT);
    }

    #[test]
    fn capped_limits_huge_amounts() {
        assert_eq!(capped("debts", Decimal::MAX), MAX_AMOUNT);
        assert_eq!(capped("debts", MAX_AMOUNT + dec!(0.01)), MAX_AMOUNT);
    }
}
