//! Request DTOs with validation.
//!
//! Required fields are `Option` or defaulted so that their absence is
//! reported by the service layer with its own messages, not as a JSON
//! shape error.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use portal_core::types::{StaffId, SubjectId};
use portal_service::{EventInput, RegisterInput};

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[serde(default)]
    #[validate(length(max = 255, message = "Email is too long"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(max = 1024, message = "Password is too long"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 255, message = "Email is too long"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 1024, message = "Password is too long"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "First name is too long"))]
    pub firstname: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Surname is too long"))]
    pub surname: String,
    #[serde(default)]
    pub token: String,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            firstname: req.firstname,
            surname: req.surname,
            token: req.token,
        }
    }
}

/// Invitation generation request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokenRequest {
    /// Requested lifespan in days (1, 3, or 7).
    #[serde(default, deserialize_with = "loose_i64")]
    pub lifespan_days: Option<i64>,
}

/// A subject reference inside an event payload. Only `id` is read.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectSelection {
    /// Subject id.
    pub id: SubjectId,
}

/// Event create/update body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[validate(length(max = 255, message = "Event name is too long"))]
    pub event_name: Option<String>,
    #[validate(length(max = 255, message = "Location is too long"))]
    pub location: Option<String>,
    #[validate(length(max = 500, message = "Short details are too long"))]
    pub details_short: Option<String>,
    pub details_long: Option<String>,
    #[serde(default, deserialize_with = "loose_i64")]
    pub staff_id: Option<i64>,
    #[serde(default, deserialize_with = "loose_i64")]
    pub students_signed_up: Option<i64>,
    #[serde(default, deserialize_with = "loose_i64")]
    pub total_spaces: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub subjects: Vec<SubjectSelection>,
}

impl From<EventRequest> for EventInput {
    fn from(req: EventRequest) -> Self {
        let to_i32 = |n: i64| i32::try_from(n).ok();
        Self {
            event_name: req.event_name,
            location: req.location,
            details_short: req.details_short,
            details_long: req.details_long,
            staff_id: req.staff_id.map(StaffId),
            students_signed_up: req.students_signed_up.and_then(to_i32),
            total_spaces: req.total_spaces.and_then(to_i32),
            start_time: req.start_time,
            end_time: req.end_time,
            subject_ids: req.subjects.into_iter().map(|s| s.id).collect(),
        }
    }
}

/// Accepts a JSON number, a numeric string (as sent by HTML form
/// controls), or null. Anything else is treated as absent.
fn loose_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
