//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An item category (e.g. "Electronics", "Keys").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: i64,
    /// Category display name.
    pub name: String,
    /// Icon class used by clients when rendering the category.
    pub icon_class: String,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Category display name.
    pub name: String,
    /// Icon class.
    pub icon_class: String,
}
