//! Category CRUD.

use std::sync::Arc;

use reclaim_core::error::AppError;
use reclaim_core::result::AppResult;
use reclaim_database::repositories::CategoryRepository;
use reclaim_entity::category::{Category, CreateCategory};
use reclaim_entity::report::CategoryItemCount;

/// Manages item categories.
#[derive(Debug, Clone)]
pub struct CategoryService {
    /// Category repository.
    categories: Arc<CategoryRepository>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<CategoryRepository>) -> Self {
        Self { categories }
    }

    /// Lists all categories.
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.categories.find_all().await
    }

    /// Fetches a single category.
    pub async fn get(&self, id: i64) -> AppResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Creates a category.
    pub async fn create(&self, category: CreateCategory) -> AppResult<Category> {
        self.categories.create(&category).await
    }

    /// Updates a category.
    pub async fn update(&self, id: i64, category: CreateCategory) -> AppResult<Category> {
        self.get(id).await?;
        self.categories.update(id, &category).await
    }

    /// Deletes a category.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.categories.delete(id).await? {
            return Err(AppError::not_found("Category not found"));
        }
        Ok(())
    }

    /// Item counts per category.
    pub async fn item_counts(&self) -> AppResult<Vec<CategoryItemCount>> {
        self.categories.item_counts().await
    }
}
