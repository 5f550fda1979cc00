//! Request body DTOs with validation rules.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use reclaim_entity::category::CreateCategory;
use reclaim_entity::item::{CreateItem, ItemType, UpdateItem};

/// Body of `POST /api/items/{id}/claim-attempts`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClaimAttemptRequest {
    /// The claimant's answer to the verification question.
    #[validate(length(min = 1, max = 200, message = "Answer must be 1-200 characters"))]
    pub answer: String,
}

/// Body of `POST /api/items`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItemRequest {
    /// Item title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Item description.
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    /// Lost or found.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Category reference.
    pub category_id: i64,
    /// Item brand.
    #[serde(default)]
    pub brand: String,
    /// Item color.
    #[serde(default)]
    pub color: String,
    /// Where the item was lost or found.
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    /// The date the item was lost or found.
    pub date_reported: NaiveDate,
    /// Uploaded photo path, if any.
    pub photo_path: Option<String>,
    /// Verification question.
    #[validate(length(min = 1, max = 500))]
    pub verification_question: String,
    /// Verification answer.
    #[validate(length(min = 1, max = 200))]
    pub verification_answer: String,
}

impl CreateItemRequest {
    /// Converts into the domain create model. The poster is filled in by
    /// the service from the request context.
    pub fn into_create_item(self) -> CreateItem {
        CreateItem {
            poster_id: Uuid::nil(),
            title: self.title,
            description: self.description,
            item_type: self.item_type,
            category_id: self.category_id,
            brand: self.brand,
            color: self.color,
            location: self.location,
            date_reported: self.date_reported,
            photo_path: self.photo_path,
            verification_question: self.verification_question,
            verification_answer: self.verification_answer,
        }
    }
}

/// Body of `PUT /api/items/{id}`.
///
/// The verification question/answer are not editable.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateItemRequest {
    /// Item title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Item description.
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    /// Lost or found.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Category reference.
    pub category_id: i64,
    /// Item brand.
    #[serde(default)]
    pub brand: String,
    /// Item color.
    #[serde(default)]
    pub color: String,
    /// Where the item was lost or found.
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    /// The date the item was lost or found.
    pub date_reported: NaiveDate,
    /// New photo path; omit to keep the existing photo.
    pub photo_path: Option<String>,
}

impl UpdateItemRequest {
    /// Converts into the domain update model.
    pub fn into_update_item(self) -> UpdateItem {
        UpdateItem {
            title: self.title,
            description: self.description,
            item_type: self.item_type,
            category_id: self.category_id,
            brand: self.brand,
            color: self.color,
            location: self.location,
            date_reported: self.date_reported,
            photo_path: self.photo_path,
        }
    }
}

/// Body of `POST /api/categories` and `PUT /api/categories/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryRequest {
    /// Category display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Icon class.
    #[serde(default)]
    pub icon_class: String,
}

impl CategoryRequest {
    /// Converts into the domain create model.
    pub fn into_create_category(self) -> CreateCategory {
        CreateCategory {
            name: self.name,
            icon_class: self.icon_class,
        }
    }
}
