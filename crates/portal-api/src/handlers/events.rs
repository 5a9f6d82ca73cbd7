//! Event registry handlers.

use axum::Json;
use axum::extract::{Path, State};

use portal_core::error::AppError;

use crate::dto::request::EventRequest;
use crate::dto::response::{ApiResponse, EventCreatedResponse, EventsResponse, MessageResponse};
use crate::extractors::{AuthUser, ValidatedJson, parse_event_id};
use crate::state::AppState;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<EventsResponse>>, AppError> {
    let events = state.event_service.list(auth.context()).await?;
    Ok(Json(ApiResponse::ok(EventsResponse { events })))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<EventRequest>,
) -> Result<Json<ApiResponse<EventCreatedResponse>>, AppError> {
    let event_id = state
        .event_service
        .create(auth.context(), req.into())
        .await?;

    Ok(Json(ApiResponse::ok(EventCreatedResponse {
        message: "Event created successfully".to_string(),
        event_id,
    })))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<EventRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let id = parse_event_id(&id)?;
    state
        .event_service
        .update(auth.context(), id, req.into())
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Event updated successfully",
    ))))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let id = parse_event_id(&id)?;
    state.event_service.delete(auth.context(), id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Event deleted successfully",
    ))))
}
