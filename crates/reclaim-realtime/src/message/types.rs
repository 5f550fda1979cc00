//! Inbound and outbound WebSocket message type definitions.
//!
//! Push deliveries use [`reclaim_core::events::PushEvent`] directly; the
//! frames here cover the remaining protocol traffic. All frames share
//! the `type` tag namespace.

use serde::{Deserialize, Serialize};

/// Protocol frames sent by the server outside of push deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlMessage {
    /// Ping (server keepalive).
    Ping {
        /// Server timestamp.
        timestamp: i64,
    },
    /// Error message.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Pong response to server ping.
    Pong {
        /// Echoed timestamp.
        timestamp: i64,
    },
    /// Mark a notification as read.
    MarkRead {
        /// Notification ID.
        notification_id: i64,
    },
}
