//! WebSocket upgrade handler for the live push channel.

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use reclaim_core::error::AppError;
use reclaim_realtime::message::{ControlMessage, InboundMessage};
use reclaim_service::context::RequestContext;

use crate::auth::Claims;
use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt} — WebSocket upgrade
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, AppError> {
    // Authenticate before upgrade
    let claims = state.jwt_decoder.decode(&query.token)?;

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, claims, socket)))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, claims: Claims, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.realtime.register(claims.sub, claims.username.clone());
    let conn_id = handle.id;

    info!(
        conn_id = %conn_id,
        user_id = %claims.sub,
        "WebSocket connection established"
    );

    // Forward outbound frames to the socket
    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // Periodic keepalive pings
    let ping_handle = handle.clone();
    let ping_interval = state.config.realtime.ping_interval_seconds;
    let ping_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(ping_interval));
        interval.tick().await;
        loop {
            interval.tick().await;
            if !ping_handle.is_alive() {
                break;
            }
            let ping = ControlMessage::Ping {
                timestamp: Utc::now().timestamp(),
            };
            if let Ok(frame) = serde_json::to_string(&ping) {
                ping_handle.send(frame);
            }
        }
    });

    let ctx = RequestContext::new(claims.sub, claims.username.clone());

    // Process inbound messages
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_inbound(&state, &ctx, &text).await;
            }
            Ok(Message::Close(_)) => {
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // Cleanup
    outbound_task.abort();
    ping_task.abort();
    state.realtime.unregister(&conn_id);

    info!(
        conn_id = %conn_id,
        user_id = %claims.sub,
        "WebSocket connection closed"
    );
}

/// Processes an inbound frame from the client.
async fn handle_inbound(state: &AppState, ctx: &RequestContext, raw: &str) {
    match serde_json::from_str::<InboundMessage>(raw) {
        Ok(InboundMessage::MarkRead { notification_id }) => {
            if let Err(e) = state
                .notification_service
                .mark_read(ctx, notification_id)
                .await
            {
                debug!(
                    notification_id,
                    user_id = %ctx.user_id,
                    error = %e,
                    "Mark-read over WebSocket failed"
                );
            }
        }
        Ok(InboundMessage::Pong { .. }) => {}
        Err(e) => {
            debug!(error = %e, "Ignoring malformed client frame");
        }
    }
}
