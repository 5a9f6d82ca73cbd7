//! Auth handlers: login, register, logout, refresh, verify, and
//! invitation token generation.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use portal_auth::rbac::{ADMIN_REQUIRED, require_admin};
use portal_core::error::AppError;

use crate::cookie::{cleared_cookie, session_cookie};
use crate::dto::request::{GenerateTokenRequest, LoginRequest, RegisterRequest};
use crate::dto::response::{
    ApiResponse, GeneratedTokenResponse, LoginResponse, MessageResponse, RegisterResponse,
    TokenResponse, VerifyResponse,
};
use crate::extractors::{AuthUser, SessionToken, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), AppError> {
    let outcome = state.auth_service.login(&req.email, &req.password).await?;
    let jar = jar.add(session_cookie(&state.config, &outcome.token.token));

    Ok((
        jar,
        Json(ApiResponse::ok(LoginResponse {
            staff: outcome.staff,
            subjects: outcome.subjects,
            token: outcome.token.token,
        })),
    ))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, AppError> {
    let staff = state.auth_service.register(req.into()).await?;

    Ok(Json(ApiResponse::ok(RegisterResponse {
        message: "Account created successfully".to_string(),
        staff,
    })))
}

/// POST /api/auth/logout
///
/// Always succeeds; the token itself stays valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    (
        jar.add(cleared_cookie(&state.config)),
        Json(ApiResponse::ok(MessageResponse::new("Logged out successfully"))),
    )
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    SessionToken(token): SessionToken,
) -> Result<(CookieJar, Json<ApiResponse<TokenResponse>>), AppError> {
    let issued = state.auth_service.refresh(token.as_deref())?;
    let jar = jar.add(session_cookie(&state.config, &issued.token));

    Ok((
        jar,
        Json(ApiResponse::ok(TokenResponse {
            token: issued.token,
        })),
    ))
}

/// GET /api/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<ApiResponse<VerifyResponse>>, AppError> {
    let claims = state.auth_service.verify(token.as_deref())?;

    Ok(Json(ApiResponse::ok(VerifyResponse {
        user: claims.identity,
    })))
}

/// POST /api/auth/generate-token
pub async fn generate_token(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<ValidatedJson<GenerateTokenRequest>, AppError>,
) -> Result<Json<ApiResponse<GeneratedTokenResponse>>, AppError> {
    // Non-admins are refused before the body is looked at.
    require_admin(auth.access_level, ADMIN_REQUIRED)?;
    let ValidatedJson(req) = body?;

    // A missing lifespan falls through to the lifespan check after the admin check.
    let lifespan_days = req.lifespan_days.unwrap_or(0);
    let invitation = state
        .invitation_service
        .generate(auth.context(), lifespan_days)
        .await?;

    Ok(Json(ApiResponse::ok(GeneratedTokenResponse {
        token: invitation.token,
        expires_at: invitation.expires_at,
        lifespan_days,
    })))
}
