//! Session token and cookie configuration.

use serde::{Deserialize, Serialize};

/// Longest accepted session lifetime (30 days).
pub const MAX_TOKEN_TTL_MINUTES: u64 = 60 * 24 * 30;

/// `SameSite` policy applied to the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    /// Sent on top-level navigations from other sites.
    #[default]
    Lax,
    /// Never sent cross-site.
    Strict,
}

/// Session lifetime and cookie attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Token lifetime in minutes; also the cookie `Max-Age`.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Name of the cookie carrying the token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// `SameSite` attribute of the cookie.
    #[serde(default)]
    pub same_site: SameSitePolicy,
    /// Explicit `Secure` flag. When unset, follows the environment.
    #[serde(default)]
    pub secure: Option<bool>,
}

impl SessionConfig {
    /// Token lifetime in minutes, capped at [`MAX_TOKEN_TTL_MINUTES`].
    pub fn ttl_minutes(&self) -> i64 {
        self.token_ttl_minutes.min(MAX_TOKEN_TTL_MINUTES) as i64
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: default_token_ttl(),
            cookie_name: default_cookie_name(),
            same_site: SameSitePolicy::default(),
            secure: None,
        }
    }
}

fn default_token_ttl() -> u64 {
    24 * 60
}

fn default_cookie_name() -> String {
    "auth_token".to_string()
}
