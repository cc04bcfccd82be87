//! Money rounding helpers.
//!
//! All calculators work in f64 dollars and round explicitly at reporting
//! boundaries. `f64::round` rounds half away from zero, which on the
//! non-negative amounts we deal with is exactly "round half up".

/// Round to the nearest cent.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to the nearest whole dollar.
pub fn round_dollars(value: f64) -> f64 {
    value.round()
}

/// Largest multiple of `step` that is <= `value`.
///
/// Used for strategic offers (nearest lower $1,000 on a flip, nearest
/// lower $10,000 on a multi-unit).
pub fn floor_to_multiple(value: f64, step: f64) -> f64 {
    (value / step).floor() * step
}

/// Smallest multiple of `step` that is >= `value`.
///
/// Used for quantity-based renovation lines that are quoted in $500 blocks.
pub fn ceil_to_multiple(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}
