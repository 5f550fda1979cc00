//! Category repository implementation.

use sqlx::PgPool;

use reclaim_core::error::{AppError, ErrorKind};
use reclaim_core::result::AppResult;
use reclaim_entity::category::{Category, CreateCategory};
use reclaim_entity::report::CategoryItemCount;

/// Repository for category records.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a category by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    /// List all categories by name.
    pub async fn find_all(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }

    /// Create a category.
    pub async fn create(&self, category: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, icon_class) VALUES ($1, $2) RETURNING *",
        )
        .bind(&category.name)
        .bind(&category.icon_class)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create category", e))
    }

    /// Update a category's name and icon.
    pub async fn update(&self, id: i64, category: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, icon_class = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&category.name)
        .bind(&category.icon_class)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update category", e))
    }

    /// Delete a category. Returns `true` if a row was removed.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete category", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Item counts per category, largest groups first.
    pub async fn item_counts(&self) -> AppResult<Vec<CategoryItemCount>> {
        sqlx::query_as::<_, CategoryItemCount>(
            "SELECT c.name AS category_name, COUNT(i.id) AS item_count \
             FROM categories c LEFT JOIN items i ON i.category_id = c.id \
             GROUP BY c.name ORDER BY item_count DESC, c.name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count items per category", e)
        })
    }
}
