//! Shared types and pricing logic for the Inventory Dashboard
//!
//! This crate is used by the report CLI and, through WASM, by the browser
//! views, so every figure the dashboard shows is computed in one place.

pub mod dashboard;
pub mod error;
pub mod models;
pub mod pricing;
pub mod stock;
pub mod types;
pub mod validation;

pub use dashboard::*;
pub use error::*;
pub use models::*;
pub use pricing::*;
pub use stock::*;
pub use types::*;
pub use validation::*;
