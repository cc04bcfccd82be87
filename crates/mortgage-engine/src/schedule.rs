use calc_core::{require_positive_count, round_cents, CalcResult};
use serde::Serialize;

use crate::payment::{raw_periodic_payment, validate_terms, LoanTerms};

pub const DEFAULT_TERM_YEARS: u32 = 5;

/// One payment row. Running state stays unrounded internally; every field
/// here is rounded to the cent for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct AmortizationRow {
    pub payment_number: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub remaining_balance: f64,
    pub interest_to_date: f64,
    pub principal_to_date: f64,
}

/// Where the loan stands when the term is up.
#[derive(Debug, Clone, Serialize)]
pub struct TermSummary {
    pub number_of_payments: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub balance_at_end_of_term: f64,
}

/// Lifetime cost if the loan runs its full amortization.
#[derive(Debug, Clone, Serialize)]
pub struct TotalSummary {
    pub number_of_payments: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub interest_to_loan_ratio_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleQuote {
    pub periodic_payment: f64,
    pub frequency: &'static str,
    pub term_years: u32,
    pub amortization_years: u32,
    pub term: TermSummary,
    pub totals: TotalSummary,
    pub rows: Vec<AmortizationRow>,
}

/// Amortization rows for one term of the loan.
///
/// Mortgages here amortize over decades but are contracted in shorter
/// terms, so the table covers `term_years` (default 5) capped at the full
/// amortization. The final row of a fully amortized loan snaps its balance
/// to zero instead of carrying rounding dust.
pub fn amortization_schedule(terms: &LoanTerms, term_years: Option<u32>) -> CalcResult<ScheduleQuote> {
    validate_terms(terms)?;
    let term_years = term_years.unwrap_or(DEFAULT_TERM_YEARS);
    require_positive_count("term_years", term_years)?;

    let ppy = terms.frequency.payments_per_year();
    let periodic_rate = terms.annual_rate_percent / 100.0 / ppy as f64;
    let total_payments = terms.amortization_years * ppy;
    let payments_in_term = (term_years * ppy).min(total_payments);

    let payment = round_cents(raw_periodic_payment(terms));

    let mut rows = Vec::with_capacity(payments_in_term as usize);
    let mut balance = terms.loan_amount;
    let mut interest_to_date = 0.0;
    let mut principal_to_date = 0.0;

    for number in 1..=payments_in_term {
        let interest = balance * periodic_rate;
        let principal = payment - interest;
        balance -= principal;
        interest_to_date += interest;
        principal_to_date += principal;

        if number == total_payments {
            balance = 0.0;
        }

        rows.push(AmortizationRow {
            payment_number: number,
            payment,
            principal: round_cents(principal),
            interest: round_cents(interest),
            remaining_balance: round_cents(balance).max(0.0),
            interest_to_date: round_cents(interest_to_date),
            principal_to_date: round_cents(principal_to_date),
        });
    }

    let total_paid = round_cents(payment * total_payments as f64);
    let total_interest = round_cents(total_paid - terms.loan_amount);

    Ok(ScheduleQuote {
        periodic_payment: payment,
        frequency: terms.frequency.label(),
        term_years,
        amortization_years: terms.amortization_years,
        term: TermSummary {
            number_of_payments: payments_in_term,
            total_paid: round_cents(payment * payments_in_term as f64),
            total_interest: round_cents(interest_to_date),
            total_principal: round_cents(principal_to_date),
            balance_at_end_of_term: round_cents(balance).max(0.0),
        },
        totals: TotalSummary {
            number_of_payments: total_payments,
            total_paid,
            total_interest,
            interest_to_loan_ratio_percent: round_cents(total_interest / terms.loan_amount * 100.0),
        },
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::PaymentFrequency;

    fn small_loan() -> LoanTerms {
        LoanTerms {
            loan_amount: 1_200.0,
            annual_rate_percent: 12.0,
            amortization_years: 1,
            frequency: PaymentFrequency::Monthly,
        }
    }

    #[test]
    fn twelve_month_loan_pays_to_zero() {
        let schedule = amortization_schedule(&small_loan(), None).unwrap();
        // 1,200 at 12% over 12 months: 106.62/month, 12 rows even though
        // the default term is five years.
        assert_eq!(schedule.periodic_payment, 106.62);
        assert_eq!(schedule.rows.len(), 12);

        let first = &schedule.rows[0];
        assert_eq!(first.interest, 12.0);
        assert_eq!(first.principal, 94.62);
        assert_eq!(first.remaining_balance, 1_105.38);

        let last = schedule.rows.last().unwrap();
        assert_eq!(last.remaining_balance, 0.0);
        assert_eq!(schedule.term.balance_at_end_of_term, 0.0);
    }

    #[test]
    fn term_caps_the_rows() {
        let terms = LoanTerms {
            loan_amount: 300_000.0,
            annual_rate_percent: 5.0,
            amortization_years: 25,
            frequency: PaymentFrequency::Monthly,
        };
        let schedule = amortization_schedule(&terms, Some(5)).unwrap();
        assert_eq!(schedule.rows.len(), 60);
        assert_eq!(schedule.term.number_of_payments, 60);
        assert_eq!(schedule.totals.number_of_payments, 300);

        // Five years in, a 25-year loan still owes most of its principal.
        let end = schedule.term.balance_at_end_of_term;
        assert!(end > 260_000.0 && end < 270_000.0, "balance was {end}");
    }

    #[test]
    fn balances_never_increase() {
        let schedule = amortization_schedule(&small_loan(), Some(1)).unwrap();
        for pair in schedule.rows.windows(2) {
            assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
        }
    }

    #[test]
    fn cumulative_columns_track_the_rows() {
        let schedule = amortization_schedule(&small_loan(), None).unwrap();
        let second = &schedule.rows[1];
        let first = &schedule.rows[0];
        assert!((second.interest_to_date - (first.interest + second.interest)).abs() < 0.02);
        assert!((second.principal_to_date - (first.principal + second.principal)).abs() < 0.02);
    }

    #[test]
    fn every_row_splits_the_payment() {
        let terms = LoanTerms {
            loan_amount: 300_000.0,
            annual_rate_percent: 5.0,
            amortization_years: 25,
            frequency: PaymentFrequency::Monthly,
        };
        let schedule = amortization_schedule(&terms, Some(25)).unwrap();
        assert_eq!(schedule.rows.len(), 300);
        for row in &schedule.rows {
            assert!(
                (row.principal + row.interest - row.payment).abs() <= 0.01,
                "row {} splits {} + {} against payment {}",
                row.payment_number,
                row.principal,
                row.interest,
                row.payment
            );
        }
    }

    #[test]
    fn zero_term_is_rejected() {
        assert!(amortization_schedule(&small_loan(), Some(0)).is_err());
    }
}
