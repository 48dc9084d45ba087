//! Dashboard report assembly and output

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{DashboardSummary, DiscountKind, InventoryTransaction, Product, StockPolicy, StockStatus};
use std::io::Write;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::AppResult;
use crate::snapshot::Snapshot;

/// Header of the product table, in `ProductRow` field order
pub const PRODUCT_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "slug",
    "price",
    "discount_type",
    "discount_amount",
    "payable_price",
    "available_stock",
    "status",
];

/// One line of the product table
#[derive(Debug, Clone, Serialize)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub discount_type: DiscountKind,
    pub discount_amount: Decimal,
    pub payable_price: Decimal,
    pub available_stock: u64,
    pub status: StockStatus,
}

impl ProductRow {
    pub fn from_product(product: &Product, policy: &StockPolicy) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: product.price,
            discount_type: product.discount.kind(),
            discount_amount: product.discount.amount(),
            payable_price: product.payable_price(),
            available_stock: product.available_stock,
            status: product.stock_status(policy),
        }
    }
}

/// Landing page report
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub environment: String,
    /// Set when either snapshot covers only part of its list
    pub partial: bool,
    pub summary: DashboardSummary,
    pub products: Vec<ProductRow>,
}

impl DashboardReport {
    pub fn build(
        environment: &str,
        products: &Snapshot<Product>,
        transactions: &Snapshot<InventoryTransaction>,
        policy: &StockPolicy,
    ) -> Self {
        for product in products.items.iter().filter(|p| p.has_clamped_discount()) {
            tracing::warn!(
                product_id = product.id,
                discount_type = %product.discount.kind(),
                discount_amount = %product.discount.amount(),
                price = %product.price,
                "Discount out of range, clamped when pricing"
            );
        }

        let summary = DashboardSummary::compute(&products.items, &transactions.items, policy);

        tracing::info!(
            products = summary.product_count,
            transactions = summary.transaction_count,
            total_stock = summary.total_stock,
            sales = summary.sales_count,
            restock = summary.restock_product_ids.len(),
            "Dashboard summary computed"
        );

        Self {
            generated_at: Utc::now(),
            environment: environment.to_string(),
            partial: products.is_partial() || transactions.is_partial(),
            summary,
            products: products
                .items
                .iter()
                .map(|product| ProductRow::from_product(product, policy))
                .collect(),
        }
    }

    pub fn write_json<W: Write>(&self, mut writer: W) -> AppResult<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Write the product table as CSV; the header is written even with no rows
pub fn write_csv<W: Write>(rows: &[ProductRow], writer: W) -> AppResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(PRODUCT_COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Emit the report in the configured format
pub fn emit(report: &DashboardReport, output: &OutputConfig) -> AppResult<()> {
    match (output.format, &output.csv_path) {
        (OutputFormat::Json, _) => report.write_json(std::io::stdout().lock()),
        (OutputFormat::Csv, Some(path)) => {
            let file = std::fs::File::create(path)?;
            write_csv(&report.products, file)?;
            tracing::info!(path = %path.display(), rows = report.products.len(), "CSV written");
            Ok(())
        }
        (OutputFormat::Csv, None) => write_csv(&report.products, std::io::stdout().lock()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Discount, InventoryType, PaginationMeta};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn products() -> Snapshot<Product> {
        let mut lamp = Product::new(1, "Desk Lamp", dec("100"), Discount::Percentage(dec("25")));
        lamp.available_stock = 12;
        let mut chair = Product::new(2, "Office Chair", dec("50"), Discount::Fixed(dec("60")));
        chair.available_stock = 0;
        Snapshot {
            items: vec![lamp, chair],
            meta: None,
        }
    }

    fn transactions() -> Snapshot<InventoryTransaction> {
        Snapshot {
            items: vec![
                InventoryTransaction::new(1, 1, dec("60"), 15, InventoryType::Purchase).unwrap(),
                InventoryTransaction::new(2, 1, dec("75"), 3, InventoryType::Sale).unwrap(),
            ],
            meta: Some(PaginationMeta::new(2, 1, 20)),
        }
    }

    #[test]
    fn test_build_report() {
        let report = DashboardReport::build("test", &products(), &transactions(), &StockPolicy::default());

        assert!(!report.partial);
        assert_eq!(report.summary.total_stock, 12);
        assert_eq!(report.summary.sales_count, 1);
        assert_eq!(report.products.len(), 2);
        assert_eq!(report.products[0].payable_price, dec("75.00"));
        assert_eq!(report.products[0].status, StockStatus::InStock);
        assert_eq!(report.products[1].payable_price, Decimal::ZERO);
        assert_eq!(report.products[1].status, StockStatus::OutOfStock);
    }

    #[test]
    fn test_partial_snapshot_flags_report() {
        let mut transactions = transactions();
        transactions.meta = Some(PaginationMeta::new(41, 1, 20));
        let report = DashboardReport::build("test", &products(), &transactions, &StockPolicy::default());
        assert!(report.partial);
    }

    #[test]
    fn test_write_json() {
        let report = DashboardReport::build("test", &products(), &transactions(), &StockPolicy::default());
        let mut buffer = Vec::new();
        report.write_json(&mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["environment"], "test");
        assert_eq!(value["summary"]["sales_revenue"], "225.00");
        assert_eq!(value["products"][0]["status"], "in-stock");
        assert_eq!(value["products"][1]["discount_type"], "fixed");
    }

    #[test]
    fn test_write_csv() {
        let report = DashboardReport::build("test", &products(), &transactions(), &StockPolicy::default());
        let mut buffer = Vec::new();
        write_csv(&report.products, &mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "id,name,slug,price,discount_type,discount_amount,payable_price,available_stock,status"
        );
        assert_eq!(lines[1], "1,Desk Lamp,desk-lamp,100,percentage,25,75.00,12,in-stock");
        assert_eq!(lines[2], "2,Office Chair,office-chair,50,fixed,60,0.00,0,out-of-stock");
    }

    #[test]
    fn test_write_csv_without_products() {
        let mut buffer = Vec::new();
        write_csv(&[], &mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(csv.trim_end(), PRODUCT_COLUMNS.join(","));
    }
}
