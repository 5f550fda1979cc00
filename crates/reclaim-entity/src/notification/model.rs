//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use reclaim_core::{AppError, AppResult};

use super::payload::NotificationPayload;

/// A durable notification addressed to a single recipient.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: i64,
    /// The recipient user.
    pub recipient_id: Uuid,
    /// Notification title.
    pub title: String,
    /// Serialized [`NotificationPayload`], discriminated by
    /// `notificationType`.
    pub message: String,
    /// The item this notification refers to, if any.
    pub item_id: Option<i64>,
    /// The counterpart user (e.g. the claimant), if any.
    pub claimant_id: Option<Uuid>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Deserialize the stored message into its structured payload.
    pub fn payload(&self) -> AppResult<NotificationPayload> {
        serde_json::from_str(&self.message)
            .map_err(|e| AppError::from(e))
    }
}

/// Data required to persist a new notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub recipient_id: Uuid,
    /// Notification title.
    pub title: String,
    /// The structured payload to serialize into the message column.
    pub payload: NotificationPayload,
    /// The item this notification refers to, if any.
    pub item_id: Option<i64>,
    /// The counterpart user, if any.
    pub claimant_id: Option<Uuid>,
}
