use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed calculation, as stored in history.
///
/// Inputs and outputs are kept as raw JSON so every calculator can be
/// recorded through the same sink without a per-calculator table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: Uuid,
    /// Which calculator produced this record, e.g. "flip.napkin".
    pub calculator: String,
    pub inputs: serde_json::Value,
    pub outputs: serde_json::Value,
    pub calculated_at: DateTime<Utc>,
}

impl CalculationRecord {
    pub fn new(
        calculator: impl Into<String>,
        inputs: serde_json::Value,
        outputs: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            calculator: calculator.into(),
            inputs,
            outputs,
            calculated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_gets_fresh_id_and_timestamp() {
        let a = CalculationRecord::new("flip.napkin", json!({"price": 1}), json!({"profit": 2}));
        let b = CalculationRecord::new("flip.napkin", json!({"price": 1}), json!({"profit": 2}));
        assert_ne!(a.id, b.id);
        assert_eq!(a.calculator, "flip.napkin");
    }
}
