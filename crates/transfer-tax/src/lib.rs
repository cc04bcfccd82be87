//! Land transfer tax ("taxe de bienvenue") calculator.
//!
//! The tax is progressive: each bracket of the property value is taxed at
//! its own rate and the slices are summed. Bracket tables vary by
//! municipality and by year, so they are shipped as named profiles and the
//! result always says which table produced it.

mod calculator;
mod tables;

pub use calculator::{compute_tax, BracketLine, TransferTaxResult};
pub use tables::{TaxBracket, TaxTable};
