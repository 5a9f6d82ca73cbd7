//! JWT session token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use portal_core::config::AppConfig;

use super::claims::SessionClaims;
use super::rejection::TokenRejection;

/// Validates session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Required marker claim value.
    marker: String,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .field("marker", &self.marker)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from application configuration.
    pub fn new(config: &AppConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.auth.leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.auth.jwt_secret.as_bytes()),
            validation,
            marker: config.auth.token_marker.clone(),
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Checks, in order:
    /// 1. Signature validity and claim shape
    /// 2. Expiration
    /// 3. Marker claim
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenRejection> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenRejection::Expired,
                _ => {
                    debug!(error = %e, "Session token rejected");
                    TokenRejection::Invalid
                }
            },
        )?;

        if data.claims.custom != self.marker {
            return Err(TokenRejection::WrongMarker);
        }

        Ok(data.claims)
    }
}
