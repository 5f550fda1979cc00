//! # reclaim-realtime
//!
//! The live push channel: maps a user identity to zero or more WebSocket
//! connections and delivers events to all of them. Holds no durable
//! state — a disconnected user loses undelivered live events, which is
//! why the notification store is written first.

pub mod connection;
pub mod message;
