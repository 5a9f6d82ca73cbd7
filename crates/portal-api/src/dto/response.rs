//! Response DTOs.
//!
//! Every body is flat: `{"success": true, ...fields}`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use portal_auth::jwt::SessionIdentity;
use portal_core::types::EventId;
use portal_entity::event::EventListing;
use portal_entity::staff::{StaffAccount, StaffSummary};
use portal_entity::subject::{Subject, SubjectRef};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response fields, inlined next to `success`.
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Plain confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// The account (password hash omitted).
    pub staff: StaffAccount,
    /// Subjects linked to the account.
    pub subjects: Vec<SubjectRef>,
    /// Session token, also set as a cookie.
    pub token: String,
}

/// Registration response.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub staff: StaffAccount,
}

/// Refresh response.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Verify response.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    pub user: SessionIdentity,
}

/// Invitation generation response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub lifespan_days: i64,
}

/// Event listing.
#[derive(Debug, Clone, Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventListing>,
}

/// Event creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreatedResponse {
    pub message: String,
    pub event_id: EventId,
}

/// Staff directory.
#[derive(Debug, Clone, Serialize)]
pub struct StaffListResponse {
    pub staff: Vec<StaffSummary>,
}

/// Subject catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectsResponse {
    pub subjects: Vec<Subject>,
}

/// Health check.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "ok" or "degraded".
    pub status: String,
    /// Crate version.
    pub version: String,
}
