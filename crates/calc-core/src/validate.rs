//! Input guards used at the top of every calculator entry point.
//!
//! Guards reject non-finite values as well as out-of-range ones, so NaN or
//! infinity can never reach a formula.

use crate::error::{CalcError, CalcResult};

/// Require a finite value strictly greater than zero.
pub fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid(format!(
            "{field} must be a positive number, got {value}"
        )));
    }
    Ok(value)
}

/// Require a finite value greater than or equal to zero.
pub fn require_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid(format!(
            "{field} must be zero or more, got {value}"
        )));
    }
    Ok(value)
}

/// Require an integer count of at least one (units, payments, years).
pub fn require_positive_count(field: &str, value: u32) -> CalcResult<u32> {
    if value == 0 {
        return Err(CalcError::invalid(format!("{field} must be at least 1")));
    }
    Ok(value)
}
