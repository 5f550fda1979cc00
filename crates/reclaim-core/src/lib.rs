//! # reclaim-core
//!
//! Core building blocks shared by every Reclaim crate: the unified
//! [`error::AppError`] type, configuration schemas, pagination types,
//! and live-push event payloads.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
