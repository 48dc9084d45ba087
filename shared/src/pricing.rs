//! Pricing engine
//!
//! Pure functions shared by every view:
//! - Payable price from list price and discount policy
//! - Transaction total from unit price and quantity
//! - Stock and sales rollups over fetched collections
//!
//! Money is rounded to two decimal places with banker's rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{DiscountKind, InventoryTransaction, InventoryType, Product};

/// Minor-unit precision of the currency
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Discount policy attached to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// Percent off the list price, meaningful in 0..=100
    Percentage(Decimal),
    /// Currency amount off the list price
    Fixed(Decimal),
}

impl Default for Discount {
    fn default() -> Self {
        Discount::Percentage(Decimal::ZERO)
    }
}

impl Discount {
    pub fn from_parts(kind: DiscountKind, amount: Decimal) -> Self {
        match kind {
            DiscountKind::Percentage => Discount::Percentage(amount),
            DiscountKind::Fixed => Discount::Fixed(amount),
        }
    }

    pub fn kind(&self) -> DiscountKind {
        match self {
            Discount::Percentage(_) => DiscountKind::Percentage,
            Discount::Fixed(_) => DiscountKind::Fixed,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Discount::Percentage(value) | Discount::Fixed(value) => *value,
        }
    }

    /// Whether the amount lies outside the range the engine honours as-is
    pub fn is_out_of_range(&self, price: Decimal) -> bool {
        match *self {
            Discount::Percentage(value) => value < Decimal::ZERO || value > Decimal::ONE_HUNDRED,
            Discount::Fixed(amount) => amount < Decimal::ZERO || amount > price,
        }
    }
}

/// Round to the currency's minor unit, half to even, always two places
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// Price after discount
///
/// Out-of-range discounts are clamped: percentages to 0..=100, fixed amounts to
/// at least zero. The result is never negative.
pub fn compute_payable_price(price: Decimal, discount: Discount) -> Decimal {
    let price = price.max(Decimal::ZERO);

    let discounted = match discount {
        Discount::Percentage(value) => {
            let rate = value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
            price * (Decimal::ONE - rate / Decimal::ONE_HUNDRED)
        }
        Discount::Fixed(amount) => (price - amount.max(Decimal::ZERO)).max(Decimal::ZERO),
    };

    round_money(discounted)
}

/// Total price of a transaction
pub fn compute_transaction_total(unit_price: Decimal, quantity: i64) -> InventoryResult<Decimal> {
    if quantity <= 0 {
        return Err(InventoryError::InvalidQuantity(quantity));
    }

    let total = unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(InventoryError::AmountOverflow)?;

    Ok(round_money(total))
}

/// Anything counted by [`aggregate_stock`]
pub trait StockHolder {
    fn units_on_hand(&self) -> u64;
}

/// Anything counted by [`aggregate_sales_count`]
pub trait StockMovement {
    fn movement_type(&self) -> InventoryType;
}

impl StockHolder for Product {
    fn units_on_hand(&self) -> u64 {
        self.available_stock
    }
}

impl StockMovement for InventoryTransaction {
    fn movement_type(&self) -> InventoryType {
        self.inventory_type
    }
}

/// Bare `{ "available_stock": n }` entry; a missing count is 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct StockEntry {
    #[serde(default)]
    pub available_stock: u64,
}

impl StockHolder for StockEntry {
    fn units_on_hand(&self) -> u64 {
        self.available_stock
    }
}

/// Bare `{ "inventory_type": "sale" }` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MovementEntry {
    pub inventory_type: InventoryType,
}

impl StockMovement for MovementEntry {
    fn movement_type(&self) -> InventoryType {
        self.inventory_type
    }
}

/// Units on hand across all products
pub fn aggregate_stock<'a, T, I>(products: I) -> u64
where
    T: StockHolder + 'a,
    I: IntoIterator<Item = &'a T>,
{
    products
        .into_iter()
        .fold(0u64, |total, product| total.saturating_add(product.units_on_hand()))
}

/// Number of sale transactions
pub fn aggregate_sales_count<'a, T, I>(transactions: I) -> usize
where
    T: StockMovement + 'a,
    I: IntoIterator<Item = &'a T>,
{
    transactions
        .into_iter()
        .filter(|tx| tx.movement_type() == InventoryType::Sale)
        .count()
}
