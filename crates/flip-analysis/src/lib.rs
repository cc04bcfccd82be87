//! Flip profitability analysis.
//!
//! The napkin calculators implement FIP10: resale price minus purchase
//! price, renovations and a 10% reserve of the resale price for transaction
//! costs. The detailed pro-forma replaces the 10% reserve with itemized
//! acquisition, holding and selling costs.

mod detailed;
mod napkin;
mod verdict;

pub use detailed::{
    detailed_flip, DetailedFlipInput, DetailedFlipResult, FinancingSummary, FlipDetails,
    FlipFinancing, FlipSummary,
};
pub use napkin::{napkin_offer, napkin_profit, NapkinFlipResult, NapkinOfferResult};
pub use verdict::ProfitStatus;

/// Minimum profit for a flip to be worth the risk.
pub const VIABLE_PROFIT: f64 = 25_000.0;
