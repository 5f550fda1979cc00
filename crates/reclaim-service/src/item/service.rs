//! Item CRUD and listing.

use std::sync::Arc;

use tracing::info;

use reclaim_core::error::AppError;
use reclaim_core::result::AppResult;
use reclaim_core::types::pagination::{PageRequest, PageResponse};
use reclaim_database::repositories::{CategoryRepository, ItemRepository};
use reclaim_entity::item::{CreateItem, Item, ItemType, UpdateItem};

use crate::context::RequestContext;

/// Manages lost/found item reports.
#[derive(Debug, Clone)]
pub struct ItemService {
    /// Item repository.
    items: Arc<ItemRepository>,
    /// Category repository, for reference validation.
    categories: Arc<CategoryRepository>,
}

impl ItemService {
    /// Creates a new item service.
    pub fn new(items: Arc<ItemRepository>, categories: Arc<CategoryRepository>) -> Self {
        Self { items, categories }
    }

    /// Lists items, optionally filtered by type and category.
    pub async fn list(
        &self,
        item_type: Option<ItemType>,
        category_id: Option<i64>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Item>> {
        self.items.find_filtered(item_type, category_id, &page).await
    }

    /// Fetches a single item.
    pub async fn get(&self, id: i64) -> AppResult<Item> {
        self.items
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found"))
    }

    /// Creates a new report on behalf of the caller.
    pub async fn create(&self, ctx: &RequestContext, mut item: CreateItem) -> AppResult<Item> {
        if self.categories.find_by_id(item.category_id).await?.is_none() {
            return Err(AppError::validation("Unknown category"));
        }

        item.poster_id = ctx.user_id;
        let created = self.items.create(&item).await?;

        info!(
            item_id = created.id,
            poster_id = %ctx.user_id,
            item_type = %created.item_type,
            "Item reported"
        );
        Ok(created)
    }

    /// Updates a report's mutable fields. Only the poster may edit; the
    /// verification Q&A and claim state are untouched. A missing photo
    /// path keeps the existing photo.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        mut update: UpdateItem,
    ) -> AppResult<Item> {
        let existing = self.get(id).await?;
        self.require_poster(ctx, &existing)?;

        if self.categories.find_by_id(update.category_id).await?.is_none() {
            return Err(AppError::validation("Unknown category"));
        }

        if update.photo_path.is_none() {
            update.photo_path = existing.photo_path;
        }

        self.items.update(id, &update).await
    }

    /// Deletes a report. Only the poster may delete.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        let existing = self.get(id).await?;
        self.require_poster(ctx, &existing)?;

        self.items.delete(id).await?;
        info!(item_id = id, poster_id = %ctx.user_id, "Item deleted");
        Ok(())
    }

    fn require_poster(&self, ctx: &RequestContext, item: &Item) -> AppResult<()> {
        if item.poster_id != ctx.user_id {
            return Err(AppError::forbidden("Only the poster may modify this item"));
        }
        Ok(())
    }
}
