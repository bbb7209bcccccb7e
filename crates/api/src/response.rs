//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard paginated listing envelope.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub total_pages: i64,
}
