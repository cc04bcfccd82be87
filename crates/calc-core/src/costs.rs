//! Cost blocks for the detailed pro-formas.
//!
//! A detailed flip or multi analysis has several cost groups (acquisition,
//! holding, selling, operating). The caller either itemizes a group or lets
//! the calculator estimate it from the deal's prices; the resolved block
//! always says which of the two happened.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};
use crate::money::round_cents;

/// How a cost block arrives in a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CostInput {
    /// Caller-supplied lines, summed as given.
    Provided { items: BTreeMap<String, f64> },
    /// Estimated by the calculator from the deal's prices.
    #[default]
    Default,
}

/// A resolved cost block: its lines, their sum, and where they came from.
#[derive(Debug, Clone, Serialize)]
pub struct CostBreakdown {
    pub source: &'static str,
    pub items: BTreeMap<String, f64>,
    pub total: f64,
}

impl CostBreakdown {
    /// Wrap caller-provided lines. A non-finite or negative line is the
    /// caller's mistake and rejects the whole request, unlike the
    /// renovation estimator which skips bad lines.
    pub fn provided(block: &str, items: &BTreeMap<String, f64>) -> CalcResult<Self> {
        let mut rounded = BTreeMap::new();
        let mut total = 0.0;
        for (label, amount) in items {
            if !amount.is_finite() || *amount < 0.0 {
                return Err(CalcError::invalid(format!(
                    "{block}.{label} must be zero or more, got {amount}"
                )));
            }
            let cents = round_cents(*amount);
            total += cents;
            rounded.insert(label.clone(), cents);
        }
        Ok(Self {
            source: "provided",
            items: rounded,
            total: round_cents(total),
        })
    }

    /// Wrap calculator-estimated lines.
    pub fn estimated(items: BTreeMap<String, f64>) -> Self {
        let rounded: BTreeMap<String, f64> =
            items.into_iter().map(|(k, v)| (k, round_cents(v))).collect();
        let total = round_cents(rounded.values().sum());
        Self {
            source: "estimated",
            items: rounded,
            total,
        }
    }
}
