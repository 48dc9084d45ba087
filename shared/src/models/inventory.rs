//! Inventory transaction models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};
use crate::pricing::compute_transaction_total;
use crate::types::default_true;

/// Direction of an inventory transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryType {
    /// Stock in
    #[default]
    Purchase,
    /// Stock out
    Sale,
}

impl InventoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryType::Purchase => "purchase",
            InventoryType::Sale => "sale",
        }
    }
}

impl std::fmt::Display for InventoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InventoryType {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "purchase" => Ok(InventoryType::Purchase),
            "sale" => Ok(InventoryType::Sale),
            _ => Err(InventoryError::InvalidRecord {
                field: "inventory_type",
                message: "must be 'purchase' or 'sale'",
            }),
        }
    }
}

/// A recorded purchase or sale of a product
///
/// `total_price` is fixed when the transaction is recorded. Later changes to the
/// product's price never touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InventoryRecord", into = "InventoryRecord")]
pub struct InventoryTransaction {
    pub id: i64,
    pub product_id: i64,
    pub unit_price: Decimal,
    pub quantity: u64,
    pub inventory_type: InventoryType,
    pub total_price: Decimal,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl InventoryTransaction {
    /// Record a new transaction, pricing it from the unit price and quantity
    pub fn new(
        id: i64,
        product_id: i64,
        unit_price: Decimal,
        quantity: i64,
        inventory_type: InventoryType,
    ) -> InventoryResult<Self> {
        let total_price = compute_transaction_total(unit_price, quantity)?;
        Ok(Self {
            id,
            product_id,
            unit_price,
            quantity: quantity as u64,
            inventory_type,
            total_price,
            notes: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        })
    }

    pub fn is_sale(&self) -> bool {
        self.inventory_type == InventoryType::Sale
    }

    pub fn is_purchase(&self) -> bool {
        self.inventory_type == InventoryType::Purchase
    }
}

/// Inventory transaction as served by the REST API
///
/// The API repeats the quantity as `quantity` and `total_quantity`; either may be
/// present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: i64,
    pub product_id: i64,
    pub unit_price: Decimal,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub total_quantity: Option<i64>,
    pub inventory_type: InventoryType,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TryFrom<InventoryRecord> for InventoryTransaction {
    type Error = InventoryError;

    fn try_from(record: InventoryRecord) -> Result<Self, Self::Error> {
        let quantity = record
            .quantity
            .or(record.total_quantity)
            .ok_or(InventoryError::InvalidRecord {
                field: "quantity",
                message: "is required",
            })?;

        if record.unit_price < Decimal::ZERO {
            return Err(InventoryError::InvalidRecord {
                field: "unit_price",
                message: "must not be negative",
            });
        }

        let total_price = match record.total_price {
            Some(total) if total < Decimal::ZERO => {
                return Err(InventoryError::InvalidRecord {
                    field: "total_price",
                    message: "must not be negative",
                });
            }
            Some(total) if quantity > 0 => total,
            _ => compute_transaction_total(record.unit_price, quantity)?,
        };

        Ok(Self {
            id: record.id,
            product_id: record.product_id,
            unit_price: record.unit_price,
            quantity: quantity as u64,
            inventory_type: record.inventory_type,
            total_price,
            notes: record.notes,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl From<InventoryTransaction> for InventoryRecord {
    fn from(tx: InventoryTransaction) -> Self {
        let quantity = i64::try_from(tx.quantity).unwrap_or(i64::MAX);
        Self {
            id: tx.id,
            product_id: tx.product_id,
            unit_price: tx.unit_price,
            quantity: Some(quantity),
            total_quantity: Some(quantity),
            inventory_type: tx.inventory_type,
            total_price: Some(tx.total_price),
            notes: tx.notes,
            is_active: tx.is_active,
            created_at: tx.created_at,
            updated_at: tx.updated_at,
        }
    }
}
