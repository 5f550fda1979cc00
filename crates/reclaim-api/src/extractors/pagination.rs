//! Pagination query parameters.

use serde::Deserialize;

use reclaim_core::types::pagination::PageRequest;

/// Query-string pagination parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Number of items per page.
    pub page_size: Option<u64>,
}

impl PaginationParams {
    /// Converts to a clamped [`PageRequest`].
    pub fn into_page_request(self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.page_size.unwrap_or(defaults.page_size),
        )
    }
}
