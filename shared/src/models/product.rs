//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};
use crate::pricing::{compute_payable_price, Discount};
use crate::stock::{StockLevels, StockPolicy, StockStatus};
use crate::types::default_true;
use crate::validation::slugify;

/// Discount policy selector as sent over the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    #[default]
    Percentage,
    Fixed,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::Percentage => "percentage",
            DiscountKind::Fixed => "fixed",
        }
    }
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DiscountKind {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" => Ok(DiscountKind::Percentage),
            "fixed" => Ok(DiscountKind::Fixed),
            _ => Err(InventoryError::InvalidRecord {
                field: "discount_type",
                message: "must be 'percentage' or 'fixed'",
            }),
        }
    }
}

/// A catalog product with its stock counters
///
/// Deserializes from the REST representation ([`ProductRecord`]) and rejects
/// records with a negative price or negative stock counters. The payable price
/// is always derived from `price` and `discount`, never trusted from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub slug: String,
    pub price: Decimal,
    pub discount: Discount,
    pub total_stock: u64,
    pub available_stock: u64,
    pub quantity_sold: u64,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Product {
    /// New active product with empty stock
    pub fn new(id: i64, name: impl Into<String>, price: Decimal, discount: Discount) -> Self {
        let name = name.into();
        Self {
            id,
            slug: slugify(&name),
            name,
            description: None,
            meta_title: None,
            meta_description: None,
            price,
            discount,
            total_stock: 0,
            available_stock: 0,
            quantity_sold: 0,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn payable_price(&self) -> Decimal {
        compute_payable_price(self.price, self.discount)
    }

    pub fn stock_levels(&self) -> StockLevels {
        StockLevels {
            total_stock: self.total_stock,
            available_stock: self.available_stock,
            quantity_sold: self.quantity_sold,
        }
    }

    pub fn stock_status(&self, policy: &StockPolicy) -> StockStatus {
        policy.classify_units(self.available_stock)
    }

    /// Value of the units on hand at the payable price (unrounded)
    pub fn stock_value(&self) -> Decimal {
        self.payable_price()
            .saturating_mul(Decimal::from(self.available_stock))
    }

    /// True when the stored discount falls outside its valid range and will be clamped
    pub fn has_clamped_discount(&self) -> bool {
        self.discount.is_out_of_range(self.price)
    }
}

/// Product as served by the REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub slug: String,
    pub price: Decimal,
    #[serde(default)]
    pub payable_price: Option<Decimal>,
    #[serde(default)]
    pub discount_type: Option<DiscountKind>,
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
    #[serde(default)]
    pub total_stock: i64,
    #[serde(default)]
    pub available_stock: i64,
    #[serde(default)]
    pub quantity_sold: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn stock_counter(value: i64) -> InventoryResult<u64> {
    u64::try_from(value).map_err(|_| InventoryError::InvalidStock(value))
}

impl TryFrom<ProductRecord> for Product {
    type Error = InventoryError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        if record.price < Decimal::ZERO {
            return Err(InventoryError::InvalidRecord {
                field: "price",
                message: "must not be negative",
            });
        }

        let discount = Discount::from_parts(
            record.discount_type.unwrap_or_default(),
            record.discount_amount.unwrap_or(Decimal::ZERO),
        );

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            meta_title: record.meta_title,
            meta_description: record.meta_description,
            slug: record.slug,
            price: record.price,
            discount,
            total_stock: stock_counter(record.total_stock)?,
            available_stock: stock_counter(record.available_stock)?,
            quantity_sold: stock_counter(record.quantity_sold)?,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        let payable_price = product.payable_price();
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            meta_title: product.meta_title,
            meta_description: product.meta_description,
            slug: product.slug,
            price: product.price,
            payable_price: Some(payable_price),
            discount_type: Some(product.discount.kind()),
            discount_amount: Some(product.discount.amount()),
            total_stock: i64::try_from(product.total_stock).unwrap_or(i64::MAX),
            available_stock: i64::try_from(product.available_stock).unwrap_or(i64::MAX),
            quantity_sold: i64::try_from(product.quantity_sold).unwrap_or(i64::MAX),
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
