//! Item report management.

pub mod service;

pub use service::ItemService;
