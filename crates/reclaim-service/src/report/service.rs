//! Grouped-count reports over items.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use reclaim_core::result::AppResult;
use reclaim_database::repositories::ItemRepository;
use reclaim_entity::report::{CategoryItemCount, ClaimedItemEntry};

/// Default reporting window, in days, when no range is given.
const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Produces aggregated views over item reports.
#[derive(Debug, Clone)]
pub struct ReportService {
    /// Item repository.
    items: Arc<ItemRepository>,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(items: Arc<ItemRepository>) -> Self {
        Self { items }
    }

    /// Items claimed within the window, newest claims first.
    pub async fn claimed_items(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<ClaimedItemEntry>> {
        self.items.claimed_between(start, end).await
    }

    /// Lost-item report counts grouped by category. Defaults to the last
    /// 30 days when no range is given.
    pub async fn frequent_lost_items(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<CategoryItemCount>> {
        let end = end.unwrap_or_else(|| Utc::now().date_naive());
        let start = start.unwrap_or(end - Duration::days(DEFAULT_WINDOW_DAYS));
        self.items.frequent_lost_between(start, end).await
    }
}
