//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Bearer-token validation settings.
///
/// Token issuance belongs to the external identity provider; Reclaim only
/// verifies signatures on inbound requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the identity provider.
    pub jwt_secret: String,
    /// Clock-skew leeway for expiration checks, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    5
}
