//! `AuthUser` extractor: reads the session token (cookie, then bearer
//! header), verifies it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use portal_core::error::AppError;
use portal_service::context::RequestContext;

use crate::cookie::token_from_headers;
use crate::state::AppState;

/// Extracted authenticated staff context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers, &state.config.session.cookie_name);
        let claims = state.auth_service.verify(token.as_deref())?;
        Ok(Self(RequestContext::from(claims)))
    }
}

/// The raw session token, if the request carries one. Never rejects.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(token_from_headers(
            &parts.headers,
            &state.config.session.cookie_name,
        )))
    }
}
