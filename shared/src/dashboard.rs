//! Landing page statistics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{InventoryTransaction, Product};
use crate::pricing::{aggregate_sales_count, aggregate_stock, round_money};
use crate::stock::{StockPolicy, StockStatus};

/// Number of products per availability badge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatusBreakdown {
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl StockStatusBreakdown {
    fn record(&mut self, status: StockStatus) {
        match status {
            StockStatus::InStock => self.in_stock += 1,
            StockStatus::LowStock => self.low_stock += 1,
            StockStatus::OutOfStock => self.out_of_stock += 1,
        }
    }
}

/// Derived statistics over the fetched product and transaction lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub product_count: usize,
    pub active_product_count: usize,
    pub transaction_count: usize,
    pub total_stock: u64,
    pub sales_count: usize,
    pub purchase_count: usize,
    pub units_sold: u64,
    pub sales_revenue: Decimal,
    pub purchase_cost: Decimal,
    /// Units on hand valued at their payable price
    pub inventory_value: Decimal,
    pub stock_status: StockStatusBreakdown,
    /// Low and out-of-stock products, in input order
    pub restock_product_ids: Vec<i64>,
}

impl DashboardSummary {
    pub fn compute(
        products: &[Product],
        transactions: &[InventoryTransaction],
        policy: &StockPolicy,
    ) -> Self {
        let mut stock_status = StockStatusBreakdown::default();
        let mut restock_product_ids = Vec::new();
        let mut inventory_value = Decimal::ZERO;

        for product in products {
            let status = product.stock_status(policy);
            stock_status.record(status);
            if status.needs_restock() {
                restock_product_ids.push(product.id);
            }
            inventory_value = inventory_value.saturating_add(product.stock_value());
        }

        let mut purchase_count = 0;
        let mut units_sold = 0u64;
        let mut sales_revenue = Decimal::ZERO;
        let mut purchase_cost = Decimal::ZERO;

        for tx in transactions {
            if tx.is_sale() {
                units_sold = units_sold.saturating_add(tx.quantity);
                sales_revenue = sales_revenue.saturating_add(tx.total_price);
            } else {
                purchase_count += 1;
                purchase_cost = purchase_cost.saturating_add(tx.total_price);
            }
        }

        Self {
            product_count: products.len(),
            active_product_count: products.iter().filter(|p| p.is_active).count(),
            transaction_count: transactions.len(),
            total_stock: aggregate_stock(products),
            sales_count: aggregate_sales_count(transactions),
            purchase_count,
            units_sold,
            sales_revenue: round_money(sales_revenue),
            purchase_cost: round_money(purchase_cost),
            inventory_value: round_money(inventory_value),
            stock_status,
            restock_product_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InventoryType;
    use crate::pricing::Discount;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn product(id: i64, price: &str, discount: Discount, available_stock: u64) -> Product {
        let mut product = Product::new(id, format!("Product {}", id), dec(price), discount);
        product.available_stock = available_stock;
        product.total_stock = available_stock;
        product
    }

    #[test]
    fn test_empty_dashboard() {
        let summary = DashboardSummary::compute(&[], &[], &StockPolicy::default());
        assert_eq!(summary.product_count, 0);
        assert_eq!(summary.total_stock, 0);
        assert_eq!(summary.sales_count, 0);
        assert_eq!(summary.inventory_value, Decimal::ZERO);
        assert!(summary.restock_product_ids.is_empty());
    }

    #[test]
    fn test_dashboard_rollup() {
        let mut retired = product(3, "20", Discount::Fixed(dec("5")), 0);
        retired.is_active = false;

        let products = vec![
            product(1, "100", Discount::Percentage(dec("25")), 12),
            product(2, "50", Discount::Fixed(dec("60")), 4),
            retired,
        ];
        let transactions = vec![
            InventoryTransaction::new(1, 1, dec("60"), 15, InventoryType::Purchase).unwrap(),
            InventoryTransaction::new(2, 1, dec("75"), 3, InventoryType::Sale).unwrap(),
            InventoryTransaction::new(3, 2, dec("19.99"), 3, InventoryType::Sale).unwrap(),
        ];

        let summary = DashboardSummary::compute(&products, &transactions, &StockPolicy::default());

        assert_eq!(summary.product_count, 3);
        assert_eq!(summary.active_product_count, 2);
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.total_stock, 16);
        assert_eq!(summary.sales_count, 2);
        assert_eq!(summary.purchase_count, 1);
        assert_eq!(summary.units_sold, 6);
        assert_eq!(summary.sales_revenue, dec("284.97"));
        assert_eq!(summary.purchase_cost, dec("900.00"));
        // 12 * 75.00 + 4 * 0.00 + 0 * 15.00
        assert_eq!(summary.inventory_value, dec("900.00"));
        assert_eq!(
            summary.stock_status,
            StockStatusBreakdown {
                in_stock: 1,
                low_stock: 1,
                out_of_stock: 1,
            }
        );
        assert_eq!(summary.restock_product_ids, vec![2, 3]);
    }

    #[test]
    fn test_policy_changes_breakdown() {
        let products = vec![product(1, "10", Discount::default(), 12)];
        let summary = DashboardSummary::compute(&products, &[], &StockPolicy::new(20));
        assert_eq!(summary.stock_status.low_stock, 1);
        assert_eq!(summary.restock_product_ids, vec![1]);
    }

    #[test]
    fn test_summary_serializes_money_as_strings() {
        let products = vec![product(1, "100", Discount::Percentage(dec("25")), 2)];
        let summary = DashboardSummary::compute(&products, &[], &StockPolicy::default());
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["inventory_value"], "150.00");
        assert_eq!(value["stock_status"]["low_stock"], 1);
    }
}
