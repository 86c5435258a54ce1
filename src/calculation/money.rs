//! Money rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, half away from zero, and fixes the scale at 2.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("17429.6475").unwrap()).to_string(), "17429.65");
/// assert_eq!(round_money(Decimal::from(20000)).to_string(), "20000.00");
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
