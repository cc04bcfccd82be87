//! Mortgage payment and amortization engine.
//!
//! Payments follow the standard annuity formula
//! `PMT = P * r(1+r)^n / ((1+r)^n - 1)` at the periodic rate. Accelerated
//! frequencies take the monthly payment and split it across the year
//! (`monthly * 12 / payments_per_year`), which is what makes them pay the
//! loan down faster than their plain counterparts.

mod frequency;
mod payment;
mod schedule;

pub use frequency::PaymentFrequency;
pub use payment::{interest_only_monthly, payment_quote, LoanTerms, PaymentQuote};
pub use schedule::{amortization_schedule, AmortizationRow, ScheduleQuote, TermSummary, TotalSummary};
