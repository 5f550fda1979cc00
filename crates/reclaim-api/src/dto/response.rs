//! Response body DTOs.

use serde::{Deserialize, Serialize};

/// Standard success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for this envelope.
    pub success: bool,
    /// The response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A bare count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// The count.
    pub count: i64,
}
