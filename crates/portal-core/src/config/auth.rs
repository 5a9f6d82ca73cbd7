//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). No default: must be supplied.
    #[serde(default)]
    pub jwt_secret: String,
    /// Fixed marker claim embedded in every session token.
    #[serde(default = "default_token_marker")]
    pub token_marker: String,
    /// Clock skew tolerated when checking expiry, in seconds.
    #[serde(default)]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_marker: default_token_marker(),
            leeway_seconds: 0,
        }
    }
}

fn default_token_marker() -> String {
    "staff-portal-token".to_string()
}
