//! Client-facing event projection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use portal_core::types::{EventId, StaffId};

use crate::subject::SubjectRef;

use super::model::EventWithStaff;

/// Percentage of capacity taken, rounded to the nearest integer.
/// Zero capacity yields 0.
pub fn sign_up_percentage(signed_up: i32, total_spaces: i32) -> i64 {
    if total_spaces <= 0 {
        return 0;
    }
    (f64::from(signed_up) / f64::from(total_spaces) * 100.0).round() as i64
}

/// One row of `GET /events`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListing {
    pub event_id: EventId,
    pub event_name: String,
    pub location: Option<String>,
    pub details_short: Option<String>,
    pub details_long: Option<String>,
    #[serde(rename = "staffId")]
    pub staff_assigned: Option<StaffId>,
    pub staff_name: Option<String>,
    pub students_signed_up: i32,
    pub total_spaces: i32,
    pub sign_up_percentage: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
    pub subjects: Vec<SubjectRef>,
}

impl EventListing {
    /// Assemble a listing row from a joined event and its subjects.
    pub fn new(row: EventWithStaff, subjects: Vec<SubjectRef>) -> Self {
        let event = row.event;
        Self {
            sign_up_percentage: sign_up_percentage(event.students_signed_up, event.total_spaces),
            event_id: event.event_id,
            event_name: event.event_name,
            location: event.location,
            details_short: event.details_short,
            details_long: event.details_long,
            staff_assigned: event.staff_assigned,
            staff_name: row.staff_name,
            students_signed_up: event.students_signed_up,
            total_spaces: event.total_spaces,
            start_time: event.start_time,
            end_time: event.end_time,
            created_at: event.created_at,
            updated_at: event.updated_at,
            subjects,
        }
    }
}
