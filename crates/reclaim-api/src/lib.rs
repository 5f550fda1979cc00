//! # reclaim-api
//!
//! The HTTP boundary of Reclaim: an axum router over the service layer,
//! bearer-token authentication, JSON DTOs, and the WebSocket upgrade for
//! the live push channel.

pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
