//! Store and push-channel ports consumed by the claim workflow engine.
//!
//! The engine depends on these traits rather than on concrete
//! repositories so the persist-before-push ordering and the claim state
//! machine can be exercised against in-memory stubs. The production
//! implementations delegate to the sqlx repositories below; the live
//! push implementation lives in `reclaim-realtime`.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use reclaim_core::events::PushEvent;
use reclaim_core::result::AppResult;
use reclaim_core::types::pagination::{PageRequest, PageResponse};
use reclaim_database::repositories::{ItemRepository, NotificationRepository};
use reclaim_entity::item::Item;
use reclaim_entity::notification::{NewNotification, Notification};

/// Item persistence as seen by the claim workflow engine.
#[async_trait]
pub trait ItemStore: Send + Sync + fmt::Debug {
    /// Find an item by ID.
    async fn find(&self, id: i64) -> AppResult<Option<Item>>;

    /// Transition an open item to claimed. Fails with a conflict when the
    /// version does not match or the item is no longer open.
    async fn mark_claimed(
        &self,
        id: i64,
        claimant_id: Uuid,
        claim_date: DateTime<Utc>,
        expected_version: i64,
    ) -> AppResult<Item>;
}

/// Notification persistence as seen by the workflow and notification
/// services.
#[async_trait]
pub trait NotificationStore: Send + Sync + fmt::Debug {
    /// Persist a notification. Failure here is fatal to the triggering
    /// operation: no live push may be attempted for an unrecorded event.
    async fn insert(&self, notification: &NewNotification) -> AppResult<Notification>;

    /// List a recipient's notifications, newest first.
    async fn find_by_recipient(
        &self,
        recipient_id: Uuid,
        unread_only: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count unread notifications for a recipient.
    async fn count_unread(&self, recipient_id: Uuid) -> AppResult<i64>;

    /// Mark a notification read. NotFound unless the caller is the
    /// recipient.
    async fn mark_read(&self, notification_id: i64, recipient_id: Uuid) -> AppResult<()>;

    /// Delete all of a recipient's notifications. Returns the count
    /// removed.
    async fn clear_all(&self, recipient_id: Uuid) -> AppResult<u64>;
}

/// Best-effort live delivery to currently connected sessions.
///
/// Implementations hold no durable state. Delivery is at-most-once per
/// connection with no acknowledgement or retry; a user with zero live
/// connections is a silent no-op.
#[async_trait]
pub trait PushChannel: Send + Sync + fmt::Debug {
    /// Deliver an event to every live connection of one user.
    async fn deliver_to_user(&self, user_id: Uuid, event: PushEvent);

    /// Deliver an event to every live connection.
    async fn broadcast(&self, event: PushEvent);
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn find(&self, id: i64) -> AppResult<Option<Item>> {
        self.find_by_id(id).await
    }

    async fn mark_claimed(
        &self,
        id: i64,
        claimant_id: Uuid,
        claim_date: DateTime<Utc>,
        expected_version: i64,
    ) -> AppResult<Item> {
        ItemRepository::mark_claimed(self, id, claimant_id, claim_date, expected_version).await
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, notification: &NewNotification) -> AppResult<Notification> {
        NotificationRepository::insert(self, notification).await
    }

    async fn find_by_recipient(
        &self,
        recipient_id: Uuid,
        unread_only: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        NotificationRepository::find_by_recipient(self, recipient_id, unread_only, page).await
    }

    async fn count_unread(&self, recipient_id: Uuid) -> AppResult<i64> {
        NotificationRepository::count_unread(self, recipient_id).await
    }

    async fn mark_read(&self, notification_id: i64, recipient_id: Uuid) -> AppResult<()> {
        NotificationRepository::mark_read(self, notification_id, recipient_id).await
    }

    async fn clear_all(&self, recipient_id: Uuid) -> AppResult<u64> {
        NotificationRepository::clear_all(self, recipient_id).await
    }
}
