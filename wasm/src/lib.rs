//! WebAssembly module for the Inventory Dashboard
//!
//! Provides client-side computation for:
//! - Payable price previews on the product form
//! - Transaction totals on the inventory form
//! - Landing page statistics
//! - Stock status badges

use rust_decimal::prelude::*;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::dashboard::*;
pub use shared::models::*;
pub use shared::pricing::*;
pub use shared::stock::*;

fn to_decimal(value: f64) -> Result<Decimal, String> {
    Decimal::from_f64(value).ok_or_else(|| format!("Invalid amount: {}", value))
}

/// Largest integer a JavaScript number holds exactly
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn policy_for(low_stock_threshold: Option<u32>) -> StockPolicy {
    low_stock_threshold
        .map(|threshold| StockPolicy::new(u64::from(threshold)))
        .unwrap_or_default()
}

fn payable_price(price: f64, discount_type: &str, discount_amount: f64) -> Result<f64, String> {
    let kind: DiscountKind = discount_type.parse().map_err(|e: shared::InventoryError| e.to_string())?;
    let discount = Discount::from_parts(kind, to_decimal(discount_amount)?);
    Ok(to_f64(compute_payable_price(to_decimal(price)?, discount)))
}

fn transaction_total(unit_price: f64, quantity: i32) -> Result<f64, String> {
    compute_transaction_total(to_decimal(unit_price)?, i64::from(quantity))
        .map(to_f64)
        .map_err(|e| e.to_string())
}

fn parse_list<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<Vec<T>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn stock_total(stock_json: &str) -> Result<f64, String> {
    let entries: Vec<StockEntry> = parse_list(stock_json, "stock")?;
    let total = aggregate_stock(&entries);
    if total > MAX_SAFE_INTEGER {
        return Err(format!("Total stock {} exceeds the JavaScript integer range", total));
    }
    Ok(total as f64)
}

fn sales_count(transactions_json: &str) -> Result<u32, String> {
    let entries: Vec<MovementEntry> = parse_list(transactions_json, "transactions")?;
    let count = aggregate_sales_count(&entries);
    u32::try_from(count).map_err(|_| format!("Sales count {} exceeds the u32 range", count))
}

fn stock_status(available_stock: i32, low_stock_threshold: Option<u32>) -> Result<StockStatus, String> {
    policy_for(low_stock_threshold)
        .classify(i64::from(available_stock))
        .map_err(|e| e.to_string())
}

fn summary_json(
    products_json: &str,
    transactions_json: &str,
    low_stock_threshold: Option<u32>,
) -> Result<String, String> {
    let products: Vec<Product> = parse_list(products_json, "products")?;
    let transactions: Vec<InventoryTransaction> = parse_list(transactions_json, "transactions")?;
    let summary = DashboardSummary::compute(&products, &transactions, &policy_for(low_stock_threshold));
    serde_json::to_string(&summary).map_err(|e| e.to_string())
}

/// Calculate the payable price of a product
#[wasm_bindgen(js_name = computePayablePrice)]
pub fn compute_payable_price_js(
    price: f64,
    discount_type: &str,
    discount_amount: f64,
) -> Result<f64, JsValue> {
    payable_price(price, discount_type, discount_amount).map_err(|e| JsValue::from_str(&e))
}

/// Calculate the total price of an inventory transaction
#[wasm_bindgen(js_name = computeTransactionTotal)]
pub fn compute_transaction_total_js(unit_price: f64, quantity: i32) -> Result<f64, JsValue> {
    transaction_total(unit_price, quantity).map_err(|e| JsValue::from_str(&e))
}

/// Sum `available_stock` over a JSON array of products or bare stock entries
#[wasm_bindgen(js_name = aggregateStock)]
pub fn aggregate_stock_js(products_json: &str) -> Result<f64, JsValue> {
    stock_total(products_json).map_err(|e| JsValue::from_str(&e))
}

/// Count sales in a JSON array of transactions or bare `{inventory_type}` entries
#[wasm_bindgen(js_name = aggregateSalesCount)]
pub fn aggregate_sales_count_js(transactions_json: &str) -> Result<u32, JsValue> {
    sales_count(transactions_json).map_err(|e| JsValue::from_str(&e))
}

/// Stock badge for a product: "in-stock", "low-stock" or "out-of-stock"
#[wasm_bindgen(js_name = classifyStockStatus)]
pub fn classify_stock_status_js(
    available_stock: i32,
    low_stock_threshold: Option<u32>,
) -> Result<String, JsValue> {
    stock_status(available_stock, low_stock_threshold)
        .map(|status| status.to_string())
        .map_err(|e| JsValue::from_str(&e))
}

/// Landing page statistics as JSON
#[wasm_bindgen(js_name = dashboardSummary)]
pub fn dashboard_summary_js(
    products_json: &str,
    transactions_json: &str,
    low_stock_threshold: Option<u32>,
) -> Result<String, JsValue> {
    summary_json(products_json, transactions_json, low_stock_threshold)
        .map_err(|e| JsValue::from_str(&e))
}

/// Slug preview for the product form
#[wasm_bindgen(js_name = slugify)]
pub fn slugify_js(name: &str) -> String {
    shared::slugify(name)
}
