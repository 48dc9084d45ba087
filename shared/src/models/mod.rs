//! Domain models for the Inventory Dashboard

mod inventory;
mod product;

pub use inventory::*;
pub use product::*;
