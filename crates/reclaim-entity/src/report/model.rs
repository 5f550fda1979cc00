//! Rows produced by the reporting queries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the claimed-items report.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClaimedItemEntry {
    /// The claimed item's ID.
    pub item_id: i64,
    /// The claimed item's title.
    pub title: String,
    /// The category name.
    pub category_name: String,
    /// The posting user.
    pub poster_id: Uuid,
    /// The date the item was originally reported.
    pub date_reported: NaiveDate,
    /// When the claim was approved.
    pub claim_date: DateTime<Utc>,
    /// The user whose claim was approved.
    pub claimed_by: Option<Uuid>,
}

/// Per-category item count for grouped reports.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CategoryItemCount {
    /// The category name.
    pub category_name: String,
    /// Number of items in the group.
    pub item_count: i64,
}
