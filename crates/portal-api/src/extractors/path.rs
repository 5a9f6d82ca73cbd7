//! Typed path parameter helpers.

use portal_core::error::AppError;
use portal_core::types::EventId;

/// Parses an event id from a path segment.
pub fn parse_event_id(s: &str) -> Result<EventId, AppError> {
    match s.parse::<EventId>() {
        Ok(id) if id.get() > 0 => Ok(id),
        _ => Err(AppError::validation("Invalid event id")),
    }
}
