//! Connection manager — connection lifecycle and event delivery.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use reclaim_core::config::realtime::RealtimeConfig;
use reclaim_core::events::PushEvent;
use reclaim_service::ports::PushChannel;

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Manages all active WebSocket connections and delivers push events.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: Arc<ConnectionPool>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            config,
        }
    }

    /// Registers a new authenticated connection.
    ///
    /// Returns the connection handle and a receiver for outbound frames.
    pub fn register(
        &self,
        user_id: Uuid,
        username: String,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);

        let handle = Arc::new(ConnectionHandle::new(user_id, username, tx));

        // Cap connections per user: the oldest one is replaced.
        let existing = self.pool.get_user_connections(&user_id);
        if existing.len() >= self.config.max_connections_per_user {
            warn!(
                user_id = %user_id,
                count = existing.len(),
                max = self.config.max_connections_per_user,
                "User at max connections, oldest will be replaced"
            );
            if let Some(oldest) = existing.first() {
                oldest.mark_dead();
                self.pool.remove(&oldest.id);
            }
        }

        self.pool.add(handle.clone());

        info!(
            conn_id = %handle.id,
            user_id = %user_id,
            "WebSocket connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a connection.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_dead();
            info!(
                conn_id = %conn_id,
                user_id = %handle.user_id,
                "WebSocket connection unregistered"
            );
        }
    }

    /// Sends a pre-serialized frame to all of a user's connections.
    fn send_frame_to_user(&self, user_id: &Uuid, frame: &str) {
        let connections = self.pool.get_user_connections(user_id);
        if connections.is_empty() {
            debug!(user_id = %user_id, "No live connections, skipping push");
            return;
        }

        for conn in &connections {
            if !conn.send(frame.to_string()) {
                warn!(conn_id = %conn.id, "Failed to send to user connection");
            }
        }
    }

    /// Checks if a user is currently connected.
    pub fn is_user_connected(&self, user_id: &Uuid) -> bool {
        !self.pool.get_user_connections(user_id).is_empty()
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Returns the number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.pool.user_count()
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.pool
    }
}

#[async_trait]
impl PushChannel for ConnectionManager {
    /// Delivers an event to every live connection of one user.
    ///
    /// Zero connections is a silent no-op: the durable notification is
    /// the source of truth, the push a best-effort latency optimization.
    async fn deliver_to_user(&self, user_id: Uuid, event: PushEvent) {
        debug!(user_id = %user_id, event = event.name(), "Delivering push event");
        let frame = match serde_json::to_string(&event) {
            Ok(f) => f,
            Err(e) => {
                error!(error = %e, "Failed to serialize push event");
                return;
            }
        };
        self.send_frame_to_user(&user_id, &frame);
    }

    /// Delivers an event to every live connection.
    async fn broadcast(&self, event: PushEvent) {
        let frame = match serde_json::to_string(&event) {
            Ok(f) => f,
            Err(e) => {
                error!(error = %e, "Failed to serialize broadcast event");
                return;
            }
        };
        for conn in self.pool.all_connections() {
            conn.send(frame.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn manager() -> ConnectionManager {
        ConnectionManager::new(RealtimeConfig::default())
    }

    fn event() -> PushEvent {
        PushEvent::ReceiveNotification {
            id: 1,
            title: "Claim Approved".to_string(),
            message: "Your claim has been approved!".to_string(),
            item_id: Some(42),
            claimant_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_deliver_without_connections_is_a_noop() {
        let mgr = manager();
        // Must complete normally with no registered connections.
        mgr.deliver_to_user(Uuid::new_v4(), event()).await;
        assert_eq!(mgr.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_deliver_reaches_all_user_connections() {
        let mgr = manager();
        let user = Uuid::new_v4();
        let (_h1, mut rx1) = mgr.register(user, "alice".to_string());
        let (_h2, mut rx2) = mgr.register(user, "alice".to_string());

        mgr.deliver_to_user(user, event()).await;

        let frame1 = rx1.try_recv().unwrap();
        let frame2 = rx2.try_recv().unwrap();
        assert_eq!(frame1, frame2);
        let value: serde_json::Value = serde_json::from_str(&frame1).unwrap();
        assert_eq!(value["type"], "receive_notification");
    }

    #[tokio::test]
    async fn test_deliver_skips_other_users() {
        let mgr = manager();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let (_ha, mut rx_alice) = mgr.register(alice, "alice".to_string());
        let (_hb, mut rx_bob) = mgr.register(bob, "bob".to_string());

        mgr.deliver_to_user(alice, event()).await;

        assert!(rx_alice.try_recv().is_ok());
        assert!(rx_bob.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_register_evicts_oldest_at_cap() {
        let config = RealtimeConfig {
            max_connections_per_user: 2,
            ..RealtimeConfig::default()
        };
        let mgr = ConnectionManager::new(config);
        let user = Uuid::new_v4();

        let (h1, _rx1) = mgr.register(user, "alice".to_string());
        let (_h2, _rx2) = mgr.register(user, "alice".to_string());
        let (_h3, _rx3) = mgr.register(user, "alice".to_string());

        assert_eq!(mgr.pool().get_user_connections(&user).len(), 2);
        assert!(!h1.is_alive());
    }

    #[tokio::test]
    async fn test_unregister_clears_user() {
        let mgr = manager();
        let user = Uuid::new_v4();
        let (h, _rx) = mgr.register(user, "alice".to_string());

        assert!(mgr.is_user_connected(&user));
        mgr.unregister(&h.id);
        assert!(!mgr.is_user_connected(&user));
    }
}
