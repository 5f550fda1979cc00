//! Reporting view models.

pub mod model;

pub use model::{CategoryItemCount, ClaimedItemEntry};
