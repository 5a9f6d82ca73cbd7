//! Read-only staff and subject listings.

use axum::Json;
use axum::extract::State;

use portal_core::error::AppError;

use crate::dto::response::{ApiResponse, StaffListResponse, SubjectsResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/staff
pub async fn list_staff(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<StaffListResponse>>, AppError> {
    let staff = state.directory_service.list_staff().await?;
    Ok(Json(ApiResponse::ok(StaffListResponse { staff })))
}

/// GET /api/subjects
pub async fn list_subjects(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<SubjectsResponse>>, AppError> {
    let subjects = state.directory_service.list_subjects().await?;
    Ok(Json(ApiResponse::ok(SubjectsResponse { subjects })))
}
