//! Page/offset arithmetic for paginated listings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 50;

/// A clamped page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Build a page request, defaulting and clamping out-of-range values.
    ///
    /// `page < 1` becomes 1; `per_page` is clamped to `1..=MAX_PER_PAGE`.
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Pagination metadata for a result set of `total` rows.
    pub fn meta(&self, total: i64) -> PageMeta {
        let total = total.max(0);
        PageMeta {
            page: self.page,
            per_page: self.per_page,
            total,
            page_count: (total + self.per_page - 1) / self.per_page,
        }
    }
}

/// Pagination fields added to paginated response envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    #[serde(rename = "pageCount")]
    pub page_count: i64,
}
