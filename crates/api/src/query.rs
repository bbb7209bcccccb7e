//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Maximum items per page.
const MAX_LIMIT: i64 = 100;

/// Default items per page.
const DEFAULT_LIMIT: i64 = 10;

/// Generic pagination parameters (`?limit=&page=`).
///
/// `limit` is clamped to 1..=100 (default 10), `page` is 1-based.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

impl PaginationParams {
    /// Effective page size after clamping.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Row offset for the requested page.
    pub fn offset(&self) -> i64 {
        (self.page.unwrap_or(1).max(1) - 1) * self.limit()
    }

    /// Number of pages needed for `total_items` rows at this page size.
    pub fn total_pages(&self, total_items: i64) -> i64 {
        let limit = self.limit();
        (total_items + limit - 1) / limit
    }
}
