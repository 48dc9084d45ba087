//! Stock status classification and the stock ledger

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};
use crate::models::{InventoryTransaction, InventoryType};

/// Units below which a product counts as low on stock
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 10;

/// Availability badge shown next to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }

    pub fn needs_restock(&self) -> bool {
        !matches!(self, StockStatus::InStock)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock classification policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPolicy {
    pub low_stock_threshold: u64,
}

impl Default for StockPolicy {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl StockPolicy {
    pub fn new(low_stock_threshold: u64) -> Self {
        Self {
            low_stock_threshold,
        }
    }

    /// Classify a raw stock figure, rejecting negative values
    pub fn classify(&self, available_stock: i64) -> InventoryResult<StockStatus> {
        let units =
            u64::try_from(available_stock).map_err(|_| InventoryError::InvalidStock(available_stock))?;
        Ok(self.classify_units(units))
    }

    pub fn classify_units(&self, available_stock: u64) -> StockStatus {
        match available_stock {
            0 => StockStatus::OutOfStock,
            units if units < self.low_stock_threshold => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }
}

/// Classify stock against the default threshold
pub fn classify_stock_status(available_stock: i64) -> InventoryResult<StockStatus> {
    StockPolicy::default().classify(available_stock)
}

/// Stock counters carried on a product
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    pub total_stock: u64,
    pub available_stock: u64,
    pub quantity_sold: u64,
}

impl StockLevels {
    /// Counters after recording one transaction
    ///
    /// Purchases add to total and available stock. Sales draw down available stock
    /// and count toward units sold; a sale larger than the available stock fails.
    pub fn apply(&self, inventory_type: InventoryType, quantity: i64) -> InventoryResult<Self> {
        if quantity <= 0 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }
        let quantity = quantity as u64;

        match inventory_type {
            InventoryType::Purchase => Ok(Self {
                total_stock: self
                    .total_stock
                    .checked_add(quantity)
                    .ok_or(InventoryError::AmountOverflow)?,
                available_stock: self
                    .available_stock
                    .checked_add(quantity)
                    .ok_or(InventoryError::AmountOverflow)?,
                quantity_sold: self.quantity_sold,
            }),
            InventoryType::Sale => {
                if self.available_stock < quantity {
                    return Err(InventoryError::InsufficientStock {
                        available: self.available_stock,
                        requested: quantity,
                    });
                }
                Ok(Self {
                    total_stock: self.total_stock,
                    available_stock: self.available_stock - quantity,
                    quantity_sold: self
                        .quantity_sold
                        .checked_add(quantity)
                        .ok_or(InventoryError::AmountOverflow)?,
                })
            }
        }
    }

    pub fn apply_transaction(&self, tx: &InventoryTransaction) -> InventoryResult<Self> {
        let quantity = i64::try_from(tx.quantity).map_err(|_| InventoryError::AmountOverflow)?;
        self.apply(tx.inventory_type, quantity)
    }

    /// Rebuild counters from an ordered transaction history starting at zero
    pub fn replay<'a, I>(transactions: I) -> InventoryResult<Self>
    where
        I: IntoIterator<Item = &'a InventoryTransaction>,
    {
        transactions
            .into_iter()
            .try_fold(Self::default(), |levels, tx| levels.apply_transaction(tx))
    }
}
