//! Request validation for product and inventory forms
//!
//! The forms are strict where the pricing engine is lenient: an out-of-range
//! discount is rejected here but clamped when a stored product is priced.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::InventoryResult;
use crate::models::{DiscountKind, InventoryType};
use crate::pricing::{compute_payable_price, compute_transaction_total, Discount};
use crate::types::default_true;

// ============================================================================
// Request bodies
// ============================================================================

/// Body of a product create or update request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_discount_policy"))]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub meta_title: Option<String>,
    #[validate(length(max = 255))]
    pub meta_description: Option<String>,
    #[validate(custom = "validate_non_negative")]
    pub price: Decimal,
    #[serde(default)]
    pub discount_type: Option<DiscountKind>,
    /// `null` or missing means no discount
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub discount_amount: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl ProductRequest {
    pub fn discount(&self) -> Discount {
        Discount::from_parts(
            self.discount_type.unwrap_or_default(),
            self.discount_amount.unwrap_or(Decimal::ZERO),
        )
    }

    /// Payable price the product will carry once saved
    pub fn preview_payable_price(&self) -> Decimal {
        compute_payable_price(self.price, self.discount())
    }
}

/// Body of an inventory create or update request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InventoryRequest {
    #[validate(custom = "validate_non_negative")]
    pub unit_price: Decimal,
    #[validate(range(min = 1))]
    pub total_quantity: i64,
    pub inventory_type: InventoryType,
    #[validate(length(max = 255))]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[validate(range(min = 1))]
    pub product_id: i64,
}

impl InventoryRequest {
    /// Total price the transaction will be recorded with
    pub fn preview_total(&self) -> InventoryResult<Decimal> {
        compute_transaction_total(self.unit_price, self.total_quantity)
    }
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

fn validate_discount_policy(request: &ProductRequest) -> Result<(), ValidationError> {
    match request.discount() {
        Discount::Percentage(value) if value > Decimal::ONE_HUNDRED => {
            Err(ValidationError::new("percentage_above_100"))
        }
        Discount::Fixed(amount) if amount > request.price => {
            Err(ValidationError::new("fixed_discount_above_price"))
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Slugs
// ============================================================================

/// URL slug for a product name
///
/// Transliterates to ASCII, lowercases, collapses every run of other
/// characters into a single `-` and trims dashes from both ends.
pub fn slugify(name: &str) -> String {
    let ascii = deunicode::deunicode(name);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slug for `name` that `is_taken` does not report as used, suffixed `-1`, `-2`, ...
pub fn unique_slug<F>(name: &str, mut is_taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    let base = slugify(name);
    if !is_taken(&base) {
        return base;
    }

    let mut counter = 1u64;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
