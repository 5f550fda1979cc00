//! Item entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::item_type::ItemType;

/// A lost or found item report.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier.
    pub id: i64,
    /// The user who posted this report.
    pub poster_id: Uuid,
    /// Item title.
    pub title: String,
    /// Item description.
    pub description: String,
    /// Whether the item was lost or found.
    pub item_type: ItemType,
    /// The category this item belongs to.
    pub category_id: i64,
    /// Item brand (free text, may be empty).
    pub brand: String,
    /// Item color (free text, may be empty).
    pub color: String,
    /// Where the item was lost or found.
    pub location: String,
    /// The date the item was lost or found.
    pub date_reported: NaiveDate,
    /// Path to the uploaded photo, if any.
    pub photo_path: Option<String>,
    /// The poster's verification question shown to claimants.
    pub verification_question: String,
    /// The expected answer. Shared only between the poster and the claim
    /// workflow; never serialized out of the server.
    #[serde(skip_serializing, default)]
    pub verification_answer: String,
    /// Whether the item has been claimed.
    pub is_claimed: bool,
    /// When the claim was approved. Set if and only if `is_claimed`.
    pub claim_date: Option<DateTime<Utc>>,
    /// The user whose claim was approved.
    pub claimed_by: Option<Uuid>,
    /// Optimistic concurrency token, bumped on every update.
    pub version: i64,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Whether the item is still open for claims.
    pub fn is_open(&self) -> bool {
        !self.is_claimed
    }
}

/// Data required to create a new item report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// The posting user.
    pub poster_id: Uuid,
    /// Item title.
    pub title: String,
    /// Item description.
    pub description: String,
    /// Lost or found.
    pub item_type: ItemType,
    /// Category reference.
    pub category_id: i64,
    /// Item brand.
    pub brand: String,
    /// Item color.
    pub color: String,
    /// Where the item was lost or found.
    pub location: String,
    /// The date the item was lost or found.
    pub date_reported: NaiveDate,
    /// Uploaded photo path, if any.
    pub photo_path: Option<String>,
    /// Verification question.
    pub verification_question: String,
    /// Verification answer.
    pub verification_answer: String,
}

/// Mutable item fields for edits.
///
/// The verification question/answer are deliberately absent: they are
/// immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItem {
    /// Item title.
    pub title: String,
    /// Item description.
    pub description: String,
    /// Lost or found.
    pub item_type: ItemType,
    /// Category reference.
    pub category_id: i64,
    /// Item brand.
    pub brand: String,
    /// Item color.
    pub color: String,
    /// Where the item was lost or found.
    pub location: String,
    /// The date the item was lost or found.
    pub date_reported: NaiveDate,
    /// New photo path; `None` keeps the existing photo.
    pub photo_path: Option<String>,
}
