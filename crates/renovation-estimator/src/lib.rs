//! Renovation budget estimator.
//!
//! Two ways to build a budget: free-form line items priced by the caller,
//! or catalog items priced from standard unit costs (the "$500 rule":
//! coarse amounts, rounded up). Bad lines are skipped and reported, never
//! silently dropped and never fatal to the rest of the estimate.

mod catalog;
mod estimate;

pub use catalog::{catalog, catalog_estimate, CatalogEntry, CatalogItem, RenovationKind};
pub use estimate::{
    estimate, RenovationEstimate, RenovationLineItem, SkippedItem, DEFAULT_CONTINGENCY_PERCENT,
};
