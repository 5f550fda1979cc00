//! HTTP error surface.
//!
//! The `AppError` → response mapping lives in `reclaim-core::error` so
//! every crate shares one wire shape; this module re-exports the body
//! type for handler-level use.

pub use reclaim_core::error::ApiErrorResponse;
