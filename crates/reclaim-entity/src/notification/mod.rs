//! Notification entity and message payloads.

pub mod model;
pub mod payload;

pub use model::{NewNotification, Notification};
pub use payload::{NotificationPayload, VerificationStatus};
