//! Error types for pricing, stock and record validation

use thiserror::Error;

/// Errors raised by the pricing engine and stock ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Invalid quantity: {0} (must be greater than zero)")]
    InvalidQuantity(i64),

    #[error("Invalid stock level: {0} (cannot be negative)")]
    InvalidStock(i64),

    #[error("Amount or unit count exceeds the supported range")]
    AmountOverflow,

    #[error("Insufficient available stock: requested {requested}, available {available}")]
    InsufficientStock { available: u64, requested: u64 },

    #[error("Invalid {field}: {message}")]
    InvalidRecord {
        field: &'static str,
        message: &'static str,
    },
}

/// Result type alias for domain operations
pub type InventoryResult<T> = Result<T, InventoryError>;
