//! Notification repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use reclaim_core::error::{AppError, ErrorKind};
use reclaim_core::result::AppResult;
use reclaim_core::types::pagination::{PageRequest, PageResponse};
use reclaim_entity::notification::{NewNotification, Notification};

/// Repository for durable notification records.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new notification. The payload is serialized into the
    /// message column.
    pub async fn insert(&self, notification: &NewNotification) -> AppResult<Notification> {
        let message = serde_json::to_string(&notification.payload)?;

        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (recipient_id, title, message, item_id, claimant_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(notification.recipient_id)
        .bind(&notification.title)
        .bind(&message)
        .bind(notification.item_id)
        .bind(notification.claimant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    /// List notifications for a recipient, newest first.
    pub async fn find_by_recipient(
        &self,
        recipient_id: Uuid,
        unread_only: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient_id = $1 AND ($2::bool = FALSE OR is_read = FALSE)",
        )
        .bind(recipient_id)
        .bind(unread_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
        })?;

        let notifs = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications \
             WHERE recipient_id = $1 AND ($2::bool = FALSE OR is_read = FALSE) \
             ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4",
        )
        .bind(recipient_id)
        .bind(unread_only)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            notifs,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count unread notifications for a recipient.
    pub async fn count_unread(&self, recipient_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Mark a notification as read. The recipient filter enforces
    /// ownership: a non-recipient gets NotFound even for an existing ID.
    pub async fn mark_read(&self, notification_id: i64, recipient_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE id = $1 AND recipient_id = $2",
        )
        .bind(notification_id)
        .bind(recipient_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }

    /// Delete all notifications for a recipient. Returns the count removed.
    pub async fn clear_all(&self, recipient_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE recipient_id = $1")
            .bind(recipient_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear notifications", e)
            })?;
        Ok(result.rows_affected())
    }
}
