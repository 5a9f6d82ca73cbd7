//! Event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use portal_core::AppError;
use portal_core::types::{EventId, StaffId, SubjectId};

/// A persisted event row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Event identifier.
    pub event_id: EventId,
    /// Display name.
    pub event_name: String,
    /// Where it happens.
    pub location: Option<String>,
    /// One-line summary.
    pub details_short: Option<String>,
    /// Full description.
    pub details_long: Option<String>,
    /// Staff member running the event.
    pub staff_assigned: Option<StaffId>,
    /// Students already signed up.
    pub students_signed_up: i32,
    /// Capacity.
    pub total_spaces: i32,
    /// Start time.
    pub start_time: DateTime<Utc>,
    /// End time.
    pub end_time: DateTime<Utc>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// An event joined with its assigned staff member's display name.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithStaff {
    /// The event row.
    #[sqlx(flatten)]
    pub event: Event,
    /// "Firstname Surname", absent if no staff is assigned.
    pub staff_name: Option<String>,
}

/// All mutable fields of an event, used for both create and update.
#[derive(Debug, Clone)]
pub struct EventDraft {
    /// Display name.
    pub event_name: String,
    /// Where it happens.
    pub location: Option<String>,
    /// One-line summary.
    pub details_short: Option<String>,
    /// Full description.
    pub details_long: Option<String>,
    /// Assigned staff member.
    pub staff_id: StaffId,
    /// Students already signed up. `None` keeps the stored count on update
    /// and starts at zero on create.
    pub students_signed_up: Option<i32>,
    /// Capacity.
    pub total_spaces: i32,
    /// Start time.
    pub start_time: DateTime<Utc>,
    /// End time.
    pub end_time: DateTime<Utc>,
    /// Linked subjects. Replaces the existing set wholesale on update.
    pub subject_ids: Vec<SubjectId>,
}

impl EventDraft {
    /// Check field invariants: non-blank name, positive capacity, `start < end`.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.event_name.trim().is_empty() || self.total_spaces <= 0 {
            return Err(AppError::validation("Missing required fields"));
        }
        if self.students_signed_up.is_some_and(|n| n < 0) {
            return Err(AppError::validation(
                "Students signed up cannot be negative",
            ));
        }
        if self.start_time >= self.end_time {
            return Err(AppError::validation("End time must be after start time"));
        }
        Ok(())
    }
}
