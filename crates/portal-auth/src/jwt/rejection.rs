//! Reasons a presented session token is refused.

use thiserror::Error;

use portal_core::error::AppError;

/// Why a session token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// No token in the cookie or the `Authorization` header.
    #[error("No authentication token")]
    Missing,
    /// Signature valid but `exp` has passed.
    #[error("Token expired, please login again")]
    Expired,
    /// Bad signature, malformed token, or undecodable claims.
    #[error("Invalid or malformed token")]
    Invalid,
    /// Signed with our secret but lacking the portal marker claim.
    #[error("Invalid token format")]
    WrongMarker,
}

impl From<TokenRejection> for AppError {
    fn from(rejection: TokenRejection) -> Self {
        match rejection {
            TokenRejection::Missing => AppError::unauthenticated(rejection.to_string()),
            _ => AppError::invalid_token(rejection.to_string()),
        }
    }
}
