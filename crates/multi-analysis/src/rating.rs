use serde::Serialize;

use crate::TARGET_CASHFLOW_PER_UNIT;

/// How the monthly per-unit cashflow grades out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CashflowRating {
    /// At or above the $75/unit/month bar.
    Excellent,
    /// $50 to $75 per unit per month.
    Good,
    /// Positive but thin.
    Moderate,
    /// Break-even or bleeding.
    Poor,
}

impl CashflowRating {
    pub fn from_per_unit_per_month(cashflow: f64) -> Self {
        if cashflow >= TARGET_CASHFLOW_PER_UNIT {
            CashflowRating::Excellent
        } else if cashflow >= 50.0 {
            CashflowRating::Good
        } else if cashflow > 0.0 {
            CashflowRating::Moderate
        } else {
            CashflowRating::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CashflowRating::Excellent => "excellent",
            CashflowRating::Good => "good",
            CashflowRating::Moderate => "moderate",
            CashflowRating::Poor => "poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(CashflowRating::from_per_unit_per_month(166.67), CashflowRating::Excellent);
        assert_eq!(CashflowRating::from_per_unit_per_month(75.0), CashflowRating::Excellent);
        assert_eq!(CashflowRating::from_per_unit_per_month(74.99), CashflowRating::Good);
        assert_eq!(CashflowRating::from_per_unit_per_month(50.0), CashflowRating::Good);
        assert_eq!(CashflowRating::from_per_unit_per_month(10.0), CashflowRating::Moderate);
        assert_eq!(CashflowRating::from_per_unit_per_month(0.0), CashflowRating::Poor);
        assert_eq!(CashflowRating::from_per_unit_per_month(-30.0), CashflowRating::Poor);
    }
}
