//! Multi-unit rental analysis.
//!
//! The napkin calculators implement the PAR method (price, apartments,
//! revenue): operating expenses as a tiered share of gross revenue, debt
//! service by the HIGH-5 shortcut (0.5% of the price per month), and a
//! $75/unit/month cashflow bar. The detailed pro-forma swaps HIGH-5 for a
//! real mortgage payment and adds vacancy, cap rate and cash-on-cash.

mod detailed;
mod napkin;
mod rating;

pub use detailed::{
    detailed_multi, DetailedMultiInput, DetailedMultiResult, FinancingSummary, MultiFinancing,
};
pub use napkin::{
    expense_ratio, max_purchase_price, napkin_cashflow, MaxPurchaseResult, NapkinMultiResult,
};
pub use rating::CashflowRating;

/// Monthly cashflow per unit a deal should clear.
pub const TARGET_CASHFLOW_PER_UNIT: f64 = 75.0;
