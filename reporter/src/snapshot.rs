//! Snapshot loading
//!
//! A snapshot is the saved body of a list endpoint response, either the
//! paginated `{ "data": [...], "meta": {...} }` object or a bare JSON array.
//! Every record is validated while decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{InventoryTransaction, PaginatedResponse, PaginationMeta, Product};
use std::path::Path;

use crate::config::SnapshotConfig;
use crate::error::{AppError, AppResult};

/// Decoded list snapshot
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub items: Vec<T>,
    /// Present when the snapshot was a paginated response
    pub meta: Option<PaginationMeta>,
}

impl<T> Snapshot<T> {
    /// True when the endpoint reported more items than the snapshot holds
    pub fn is_partial(&self) -> bool {
        self.meta
            .map(|meta| meta.is_partial(self.items.len()))
            .unwrap_or(false)
    }
}

/// Decode a snapshot body
pub fn decode<T: DeserializeOwned>(resource: &'static str, json: &str) -> AppResult<Snapshot<T>> {
    let format_error = |source: serde_json::Error| AppError::SnapshotFormat { resource, source };

    let value: Value = serde_json::from_str(json).map_err(format_error)?;

    if value.is_array() {
        let items: Vec<T> = serde_json::from_value(value).map_err(format_error)?;
        return Ok(Snapshot { items, meta: None });
    }

    if value.get("data").is_some() {
        let page: PaginatedResponse<T> = serde_json::from_value(value).map_err(format_error)?;
        return Ok(Snapshot {
            items: page.data,
            meta: Some(page.meta),
        });
    }

    Err(AppError::SnapshotShape { resource })
}

/// Read and decode one snapshot file
pub async fn load<T: DeserializeOwned>(
    resource: &'static str,
    path: &Path,
) -> AppResult<Snapshot<T>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;

    let snapshot: Snapshot<T> = decode(resource, &json)?;

    tracing::debug!(
        resource,
        path = %path.display(),
        items = snapshot.items.len(),
        "Snapshot loaded"
    );

    if let Some(meta) = snapshot.meta.filter(|_| snapshot.is_partial()) {
        tracing::warn!(
            resource,
            loaded = snapshot.items.len(),
            total = meta.total,
            page = meta.page,
            pages = meta.pages,
            "Snapshot holds a single page; statistics cover only the loaded items"
        );
    }

    Ok(snapshot)
}

/// Read the product and inventory snapshots concurrently
pub async fn load_all(
    config: &SnapshotConfig,
) -> AppResult<(Snapshot<Product>, Snapshot<InventoryTransaction>)> {
    tokio::try_join!(
        load::<Product>("product", &config.products_path),
        load::<InventoryTransaction>("inventory", &config.inventory_path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_paginated_products() {
        let json = r#"{
            "data": [
                {"id": 1, "name": "Lamp", "price": 40, "available_stock": 3},
                {"id": 2, "name": "Desk", "price": 250, "available_stock": 12}
            ],
            "meta": {"total": 45, "page": 1, "limit": 30, "pages": 2}
        }"#;

        let snapshot: Snapshot<Product> = decode("product", json).unwrap();
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.meta.unwrap().pages, 2);
        assert!(snapshot.is_partial());
    }

    #[test]
    fn test_decode_bare_array() {
        let json = r#"[{"id": 1, "product_id": 1, "unit_price": 5, "quantity": 2, "inventory_type": "sale"}]"#;
        let snapshot: Snapshot<InventoryTransaction> = decode("inventory", json).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert!(snapshot.meta.is_none());
        assert!(!snapshot.is_partial());
    }

    #[test]
    fn test_decode_rejects_invalid_record() {
        let json = r#"[{"id": 1, "product_id": 1, "unit_price": 5, "quantity": 0, "inventory_type": "sale"}]"#;
        let err = decode::<InventoryTransaction>("inventory", json).unwrap_err();
        assert!(matches!(err, AppError::SnapshotFormat { resource: "inventory", .. }));
        assert!(err.to_string().contains("Invalid quantity"));
    }

    #[test]
    fn test_decode_rejects_unknown_shape() {
        let err = decode::<Product>("product", r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, AppError::SnapshotShape { resource: "product" }));

        let err = decode::<Product>("product", "not json").unwrap_err();
        assert_eq!(err.code(), "SNAPSHOT_FORMAT_ERROR");
    }
}
