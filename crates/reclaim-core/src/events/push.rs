//! Live push event payloads.
//!
//! These are the server-pushed frames a connected client receives. The
//! durable notification row is always written before any of these are
//! emitted; a dropped frame is only a missed real-time update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events pushed to live client connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushEvent {
    /// A plain notification: title plus human-readable message.
    ReceiveNotification {
        /// The persisted notification ID.
        id: i64,
        /// Notification title.
        title: String,
        /// Human-readable message body.
        message: String,
        /// The item this notification refers to, if any.
        item_id: Option<i64>,
        /// The counterpart user (e.g. the claimant), if any.
        claimant_id: Option<Uuid>,
        /// When the notification was created.
        created_at: DateTime<Utc>,
    },
    /// A structured notification carrying a full claim-attempt payload.
    ReceiveDetailedNotification {
        /// The persisted notification ID.
        id: i64,
        /// Notification title.
        title: String,
        /// The structured payload, discriminated by `notificationType`.
        payload: serde_json::Value,
        /// When the notification was created.
        created_at: DateTime<Utc>,
    },
}

impl PushEvent {
    /// The wire event name, matching the serde tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReceiveNotification { .. } => "receive_notification",
            Self::ReceiveDetailedNotification { .. } => "receive_detailed_notification",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tag() {
        let event = PushEvent::ReceiveNotification {
            id: 7,
            title: "Claim Approved".to_string(),
            message: "Your claim has been approved.".to_string(),
            item_id: Some(42),
            claimant_id: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "receive_notification");
        assert_eq!(json["id"], 7);
    }
}
