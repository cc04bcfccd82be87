//! SQLite persistence for the calculator service.
//!
//! Holds calculation history plus a light registry of properties and the
//! investment projects attached to them. Everything here is best effort
//! from the calculators' point of view: a calculation succeeds whether or
//! not its history row lands.

pub mod db;
pub mod history;
pub mod models;
pub mod projects;
pub mod properties;

pub use db::PropertyStore;
pub use models::*;
