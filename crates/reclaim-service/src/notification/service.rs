//! Notification inbox: list, mark-read, clear.
//!
//! Read and delete rights belong exclusively to the recipient; the store
//! enforces ownership on every mutation.

use std::sync::Arc;

use tracing::info;

use reclaim_core::result::AppResult;
use reclaim_core::types::pagination::{PageRequest, PageResponse};
use reclaim_entity::notification::Notification;

use crate::context::RequestContext;
use crate::ports::NotificationStore;

/// Manages a user's durable notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        unread_only: bool,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.store
            .find_by_recipient(ctx.user_id, unread_only, &page)
            .await
    }

    /// Counts the caller's unread notifications.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.store.count_unread(ctx.user_id).await
    }

    /// Marks one of the caller's notifications as read.
    pub async fn mark_read(&self, ctx: &RequestContext, notification_id: i64) -> AppResult<()> {
        self.store.mark_read(notification_id, ctx.user_id).await
    }

    /// Deletes all of the caller's notifications.
    pub async fn clear_all(&self, ctx: &RequestContext) -> AppResult<u64> {
        let removed = self.store.clear_all(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, removed, "Notifications cleared");
        Ok(removed)
    }
}
