use calc_core::{require_positive, require_positive_count, round_cents, CalcResult};
use serde::{Deserialize, Serialize};

use crate::frequency::PaymentFrequency;

/// Inputs for a payment quote or an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub loan_amount: f64,
    /// Annual nominal rate in percent, e.g. 5.0 for 5%.
    pub annual_rate_percent: f64,
    pub amortization_years: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentQuote {
    pub periodic_payment: f64,
    pub frequency: &'static str,
    pub payments_per_year: u32,
    pub number_of_payments: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub interest_to_loan_ratio_percent: f64,
    /// What the payment works out to per month, for comparing frequencies.
    pub monthly_equivalent: f64,
}

/// Periodic payment before cent rounding.
///
/// Accelerated frequencies price the annuity monthly and split the monthly
/// payment across their own schedule; everything else prices at the
/// periodic rate directly.
pub(crate) fn raw_periodic_payment(terms: &LoanTerms) -> f64 {
    let ppy = terms.frequency.payments_per_year();
    if terms.frequency.is_accelerated() {
        let monthly = annuity_payment(
            terms.loan_amount,
            terms.annual_rate_percent / 100.0 / 12.0,
            terms.amortization_years * 12,
        );
        monthly * 12.0 / ppy as f64
    } else {
        annuity_payment(
            terms.loan_amount,
            terms.annual_rate_percent / 100.0 / ppy as f64,
            terms.amortization_years * ppy,
        )
    }
}

fn annuity_payment(principal: f64, periodic_rate: f64, periods: u32) -> f64 {
    let growth = (1.0 + periodic_rate).powi(periods as i32);
    principal * (periodic_rate * growth) / (growth - 1.0)
}

pub(crate) fn validate_terms(terms: &LoanTerms) -> CalcResult<()> {
    require_positive("loan_amount", terms.loan_amount)?;
    // A zero rate would divide by zero in the annuity formula; rate-free
    // loans are out of scope here.
    require_positive("annual_rate_percent", terms.annual_rate_percent)?;
    require_positive_count("amortization_years", terms.amortization_years)?;
    Ok(())
}

/// Quote the periodic payment and lifetime cost of a loan.
pub fn payment_quote(terms: &LoanTerms) -> CalcResult<PaymentQuote> {
    validate_terms(terms)?;

    let ppy = terms.frequency.payments_per_year();
    let number_of_payments = terms.amortization_years * ppy;
    let periodic_payment = round_cents(raw_periodic_payment(terms));

    let total_paid = round_cents(periodic_payment * number_of_payments as f64);
    let total_interest = round_cents(total_paid - terms.loan_amount);

    Ok(PaymentQuote {
        periodic_payment,
        frequency: terms.frequency.label(),
        payments_per_year: ppy,
        number_of_payments,
        total_paid,
        total_interest,
        interest_to_loan_ratio_percent: round_cents(total_interest / terms.loan_amount * 100.0),
        monthly_equivalent: round_cents(periodic_payment * ppy as f64 / 12.0),
    })
}

/// Monthly cost of carrying a loan interest-only, unrounded.
///
/// Flip holding costs use this for the months a property sits unsold.
pub fn interest_only_monthly(loan_amount: f64, annual_rate_percent: f64) -> CalcResult<f64> {
    require_positive("loan_amount", loan_amount)?;
    require_positive("annual_rate_percent", annual_rate_percent)?;
    Ok(loan_amount * (annual_rate_percent / 100.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn terms(frequency: PaymentFrequency) -> LoanTerms {
        LoanTerms {
            loan_amount: 300_000.0,
            annual_rate_percent: 5.0,
            amortization_years: 25,
            frequency,
        }
    }

    #[test]
    fn monthly_payment_matches_annuity_formula() {
        let quote = payment_quote(&terms(PaymentFrequency::Monthly)).unwrap();
        // 300k at 5% over 25 years: $1,753.77/month.
        assert_relative_eq!(quote.periodic_payment, 1753.77, epsilon = 0.02);
        assert_eq!(quote.number_of_payments, 300);
        assert_eq!(quote.payments_per_year, 12);
        assert_eq!(quote.frequency, "monthly");
        assert_eq!(quote.total_paid, round_cents(quote.periodic_payment * 300.0));
        assert!((quote.total_interest - (quote.total_paid - 300_000.0)).abs() < 0.01);
    }

    #[test]
    fn accelerated_biweekly_is_half_the_monthly_payment() {
        let monthly = payment_quote(&terms(PaymentFrequency::Monthly)).unwrap();
        let accel = payment_quote(&terms(PaymentFrequency::AcceleratedBiWeekly)).unwrap();
        assert!((accel.periodic_payment - monthly.periodic_payment / 2.0).abs() < 0.01);
        // 26 half-payments make 13 monthly payments a year, so the monthly
        // equivalent comes out above the true monthly payment.
        assert!(accel.monthly_equivalent > monthly.periodic_payment);
    }

    #[test]
    fn plain_biweekly_costs_more_than_accelerated() {
        let plain = payment_quote(&terms(PaymentFrequency::BiWeekly)).unwrap();
        let accel = payment_quote(&terms(PaymentFrequency::AcceleratedBiWeekly)).unwrap();
        assert!(plain.periodic_payment < accel.periodic_payment);
        assert!(plain.total_interest > accel.total_interest);
    }

    #[test]
    fn interest_ratio_is_in_percent() {
        let quote = payment_quote(&terms(PaymentFrequency::Monthly)).unwrap();
        // Roughly 75% of the loan is paid again in interest.
        assert!(quote.interest_to_loan_ratio_percent > 70.0);
        assert!(quote.interest_to_loan_ratio_percent < 80.0);
    }

    #[test]
    fn zero_rate_is_rejected() {
        let mut t = terms(PaymentFrequency::Monthly);
        t.annual_rate_percent = 0.0;
        assert!(payment_quote(&t).is_err());
    }

    #[test]
    fn zero_loan_and_zero_years_are_rejected() {
        let mut t = terms(PaymentFrequency::Monthly);
        t.loan_amount = 0.0;
        assert!(payment_quote(&t).is_err());

        let mut t = terms(PaymentFrequency::Monthly);
        t.amortization_years = 0;
        assert!(payment_quote(&t).is_err());
    }

    #[test]
    fn interest_only_monthly_cost() {
        // 200k at 6%: 1,000/month in interest.
        assert_eq!(interest_only_monthly(200_000.0, 6.0).unwrap(), 1_000.0);
        assert!(interest_only_monthly(200_000.0, 0.0).is_err());
    }

    #[test]
    fn quote_survives_serialization_unchanged() {
        let quote = payment_quote(&terms(PaymentFrequency::Monthly)).unwrap();
        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["periodic_payment"].as_f64().unwrap(), quote.periodic_payment);
        assert_eq!(value["total_paid"].as_f64().unwrap(), quote.total_paid);
        assert_eq!(value["total_interest"].as_f64().unwrap(), quote.total_interest);
        assert_eq!(
            value["monthly_equivalent"].as_f64().unwrap(),
            quote.monthly_equivalent
        );
        assert_eq!(value["frequency"], "monthly");
    }
}
