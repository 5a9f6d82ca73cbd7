//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use portal_core::config::AppConfig;
use portal_core::error::AppError;

use super::claims::{SessionClaims, SessionIdentity};

/// Creates signed session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token lifetime.
    ttl: Duration,
    /// Value written to the marker claim.
    marker: String,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl", &self.ttl)
            .field("marker", &self.marker)
            .finish()
    }
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// Expiration time.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from application configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.auth.jwt_secret.as_bytes()),
            ttl: Duration::minutes(config.session.ttl_minutes()),
            marker: config.auth.token_marker.clone(),
        }
    }

    /// Issues a token for `identity` starting now.
    pub fn issue(&self, identity: &SessionIdentity) -> Result<IssuedToken, AppError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a token for `identity` as if signed at `issued_at`.
    pub fn issue_at(
        &self,
        identity: &SessionIdentity,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expires_at = issued_at + self.ttl;
        let claims = SessionClaims {
            identity: identity.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            custom: self.marker.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
