use serde::{Deserialize, Serialize};

/// How often a mortgage payment is made.
///
/// Unknown frequency strings fail deserialization outright rather than
/// silently falling back to monthly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    Monthly,
    SemiMonthly,
    BiWeekly,
    Weekly,
    AcceleratedBiWeekly,
    AcceleratedWeekly,
}

impl PaymentFrequency {
    pub fn payments_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::SemiMonthly => 24,
            PaymentFrequency::BiWeekly | PaymentFrequency::AcceleratedBiWeekly => 26,
            PaymentFrequency::Weekly | PaymentFrequency::AcceleratedWeekly => 52,
        }
    }

    /// Accelerated frequencies derive their payment from the monthly one
    /// instead of pricing the annuity at their own periodic rate.
    pub fn is_accelerated(&self) -> bool {
        matches!(
            self,
            PaymentFrequency::AcceleratedBiWeekly | PaymentFrequency::AcceleratedWeekly
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::SemiMonthly => "semi-monthly",
            PaymentFrequency::BiWeekly => "bi-weekly",
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::AcceleratedBiWeekly => "accelerated bi-weekly",
            PaymentFrequency::AcceleratedWeekly => "accelerated weekly",
        }
    }
}

impl Default for PaymentFrequency {
    fn default() -> Self {
        PaymentFrequency::Monthly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payments_per_year_table() {
        assert_eq!(PaymentFrequency::Monthly.payments_per_year(), 12);
        assert_eq!(PaymentFrequency::SemiMonthly.payments_per_year(), 24);
        assert_eq!(PaymentFrequency::BiWeekly.payments_per_year(), 26);
        assert_eq!(PaymentFrequency::Weekly.payments_per_year(), 52);
        assert_eq!(PaymentFrequency::AcceleratedBiWeekly.payments_per_year(), 26);
        assert_eq!(PaymentFrequency::AcceleratedWeekly.payments_per_year(), 52);
    }

    #[test]
    fn wire_names_are_kebab_case() {
        let f: PaymentFrequency = serde_json::from_str("\"accelerated-bi-weekly\"").unwrap();
        assert_eq!(f, PaymentFrequency::AcceleratedBiWeekly);
        let f: PaymentFrequency = serde_json::from_str("\"semi-monthly\"").unwrap();
        assert_eq!(f, PaymentFrequency::SemiMonthly);
    }

    #[test]
    fn unknown_frequency_is_rejected() {
        assert!(serde_json::from_str::<PaymentFrequency>("\"fortnightly\"").is_err());
    }
}
