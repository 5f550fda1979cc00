//! Item repository implementation.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use reclaim_core::error::{AppError, ErrorKind};
use reclaim_core::result::AppResult;
use reclaim_core::types::pagination::{PageRequest, PageResponse};
use reclaim_entity::item::{CreateItem, Item, ItemType, UpdateItem};
use reclaim_entity::report::{CategoryItemCount, ClaimedItemEntry};

/// Repository for item CRUD and claim-state updates.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an item by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    /// List items, optionally filtered by type and category, newest first.
    pub async fn find_filtered(
        &self,
        item_type: Option<ItemType>,
        category_id: Option<i64>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Item>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM items \
             WHERE ($1::item_type IS NULL OR item_type = $1) \
               AND ($2::bigint IS NULL OR category_id = $2)",
        )
        .bind(item_type)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count items", e))?;

        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items \
             WHERE ($1::item_type IS NULL OR item_type = $1) \
               AND ($2::bigint IS NULL OR category_id = $2) \
             ORDER BY date_reported DESC, id DESC LIMIT $3 OFFSET $4",
        )
        .bind(item_type)
        .bind(category_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list items", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new item report.
    pub async fn create(&self, item: &CreateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "INSERT INTO items (poster_id, title, description, item_type, category_id, brand, \
             color, location, date_reported, photo_path, verification_question, verification_answer) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(item.poster_id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.item_type)
        .bind(item.category_id)
        .bind(&item.brand)
        .bind(&item.color)
        .bind(&item.location)
        .bind(item.date_reported)
        .bind(&item.photo_path)
        .bind(&item.verification_question)
        .bind(&item.verification_answer)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create item", e))
    }

    /// Update an item's mutable fields. Verification question/answer and
    /// claim state are never touched here.
    pub async fn update(&self, id: i64, update: &UpdateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "UPDATE items SET title = $2, description = $3, item_type = $4, category_id = $5, \
             brand = $6, color = $7, location = $8, date_reported = $9, photo_path = $10, \
             version = version + 1 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.item_type)
        .bind(update.category_id)
        .bind(&update.brand)
        .bind(&update.color)
        .bind(&update.location)
        .bind(update.date_reported)
        .bind(&update.photo_path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item", e))
    }

    /// Delete an item. Returns `true` if a row was removed.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Transition an open item to claimed.
    ///
    /// The WHERE clause checks both the optimistic version and the open
    /// state, so a racing approval loses with zero rows affected and is
    /// surfaced as a conflict.
    pub async fn mark_claimed(
        &self,
        id: i64,
        claimant_id: Uuid,
        claim_date: DateTime<Utc>,
        expected_version: i64,
    ) -> AppResult<Item> {
        let updated = sqlx::query_as::<_, Item>(
            "UPDATE items SET is_claimed = TRUE, claim_date = $2, claimed_by = $3, \
             version = version + 1 \
             WHERE id = $1 AND version = $4 AND is_claimed = FALSE RETURNING *",
        )
        .bind(id)
        .bind(claim_date)
        .bind(claimant_id)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark item claimed", e))?;

        updated.ok_or_else(|| {
            AppError::conflict("Item was claimed or modified concurrently")
        })
    }

    /// Items claimed within the given window, newest claims first.
    pub async fn claimed_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<ClaimedItemEntry>> {
        sqlx::query_as::<_, ClaimedItemEntry>(
            "SELECT i.id AS item_id, i.title, c.name AS category_name, i.poster_id, \
             i.date_reported, i.claim_date, i.claimed_by \
             FROM items i JOIN categories c ON c.id = i.category_id \
             WHERE i.is_claimed \
               AND ($1::timestamptz IS NULL OR i.claim_date >= $1) \
               AND ($2::timestamptz IS NULL OR i.claim_date <= $2) \
             ORDER BY i.claim_date DESC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query claimed items", e)
        })
    }

    /// Lost items reported within the window, grouped by category and
    /// ordered by report count.
    pub async fn frequent_lost_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<CategoryItemCount>> {
        sqlx::query_as::<_, CategoryItemCount>(
            "SELECT c.name AS category_name, COUNT(*) AS item_count \
             FROM items i JOIN categories c ON c.id = i.category_id \
             WHERE i.item_type = 'lost' AND i.date_reported BETWEEN $1 AND $2 \
             GROUP BY c.name ORDER BY item_count DESC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query frequent lost items", e)
        })
    }
}
