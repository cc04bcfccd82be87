use serde::Serialize;

use crate::VIABLE_PROFIT;

/// Profit verdict for a flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitStatus {
    /// Clears the $25,000 profit bar.
    Excellent,
    /// In the black but under the bar.
    Positive,
    Negative,
}

impl ProfitStatus {
    pub fn from_profit(profit: f64) -> Self {
        if profit > VIABLE_PROFIT {
            ProfitStatus::Excellent
        } else if profit > 0.0 {
            ProfitStatus::Positive
        } else {
            ProfitStatus::Negative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfitStatus::Excellent => "excellent",
            ProfitStatus::Positive => "positive",
            ProfitStatus::Negative => "negative",
        }
    }
}
