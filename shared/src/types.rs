//! Common types used across the dashboard

use serde::{Deserialize, Serialize};

/// Default page size of the product list endpoint
pub const PRODUCT_PAGE_LIMIT: u32 = 30;

/// Default page size of the inventory list endpoint
pub const INVENTORY_PAGE_LIMIT: u32 = 20;

/// Paginated list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u64,
}

impl PaginationMeta {
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };
        Self {
            total,
            page,
            limit,
            pages,
        }
    }

    /// True when `loaded` items fall short of the reported total
    pub fn is_partial(&self, loaded: usize) -> bool {
        (loaded as u64) < self.total
    }
}

pub(crate) fn default_true() -> bool {
    true
}
