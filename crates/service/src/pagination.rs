//! Pagination utilities for service layer
//!
//! `PaginationParams` comes from the query string, gets normalized here and
//! is echoed back inside `PaginatedResult`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    /// 1-based page index
    pub page: i64,
    /// items per page
    pub limit: i64,
}

impl PaginationParams {
    pub fn new(page: i64, limit: i64) -> Self { Self { page, limit } }

    /// Replace non-positive values with the defaults (page 1, limit 10).
    pub fn normalize(self) -> Self {
        let page = if self.page <= 0 { DEFAULT_PAGE } else { self.page };
        let limit = if self.limit <= 0 { DEFAULT_LIMIT } else { self.limit };
        Self { page, limit }
    }

    /// Zero-based page index for `Paginator::fetch_page`.
    pub fn page_index(&self) -> u64 { (self.page.max(1) - 1) as u64 }

    pub fn page_size(&self) -> u64 { self.limit.max(1) as u64 }

    /// Row offset `(page - 1) * limit`.
    pub fn offset(&self) -> u64 { self.page_index().saturating_mul(self.page_size()) }
}

impl Default for PaginationParams {
    fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}

/// One page of items plus the counters a client needs to navigate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, params: PaginationParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            limit: params.limit,
            total_pages: total.div_ceil(params.page_size()),
        }
    }
}
