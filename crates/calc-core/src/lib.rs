//! Shared types, errors and rounding rules used by every calculator crate.
//!
//! Each calculator (flip, multi, mortgage, transfer tax, renovation) consumes
//! these building blocks so that money rounding, input validation and history
//! recording behave identically across the workspace.

pub mod costs;
pub mod error;
pub mod money;
pub mod traits;
pub mod types;
pub mod validate;

pub use costs::*;
pub use error::*;
pub use money::*;
pub use traits::*;
pub use types::*;
pub use validate::*;
