//! Fixed-precision rendering of monetary amounts.
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Converts an `f64` to a `Decimal` through its shortest decimal representation,
/// so `1.005` becomes exactly `1.005` rather than `1.00499999...`.
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64_retain(value))
}

/// Renders `value` with exactly `decimals` fraction digits, rounding half away
/// from zero.
///
/// Values outside the range of `Decimal` (and non-finite ones) fall back to the
/// float formatter.
pub fn format_fixed(value: f64, decimals: u32) -> String {
    match to_decimal(value) {
        Some(d) => {
            let mut rounded =
                d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(decimals);
            rounded.to_string()
        }
        None => format!("{value:.prec$}", prec = decimals as usize),
    }
}
