//! Loosely typed event form data and its conversion into a validated draft.

use chrono::{DateTime, NaiveDateTime, Utc};

use portal_core::error::AppError;
use portal_core::types::{StaffId, SubjectId};
use portal_entity::event::EventDraft;

/// Accepted `datetime-local` layouts, tried after RFC 3339.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses an RFC 3339 timestamp, or a zone-less `datetime-local` value
/// interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Event fields as submitted by a client. Required fields are optional
/// here so that absence is reported as a validation error.
#[derive(Debug, Clone, Default)]
pub struct EventInput {
    pub event_name: Option<String>,
    pub location: Option<String>,
    pub details_short: Option<String>,
    pub details_long: Option<String>,
    pub staff_id: Option<StaffId>,
    pub students_signed_up: Option<i32>,
    pub total_spaces: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub subject_ids: Vec<SubjectId>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl EventInput {
    /// Validates presence, time ordering, and capacity.
    pub fn into_draft(self) -> Result<EventDraft, AppError> {
        let missing = || AppError::validation("Missing required fields");

        let event_name = non_blank(self.event_name).ok_or_else(missing)?;
        let staff_id = self.staff_id.ok_or_else(missing)?;
        let total_spaces = self.total_spaces.filter(|n| *n > 0).ok_or_else(missing)?;
        let start_raw = non_blank(self.start_time).ok_or_else(missing)?;
        let end_raw = non_blank(self.end_time).ok_or_else(missing)?;

        let start_time = parse_timestamp(&start_raw)
            .ok_or_else(|| AppError::validation("Invalid start time"))?;
        let end_time =
            parse_timestamp(&end_raw).ok_or_else(|| AppError::validation("Invalid end time"))?;

        let mut subject_ids = self.subject_ids;
        subject_ids.sort_unstable();
        subject_ids.dedup();

        let draft = EventDraft {
            event_name: event_name.trim().to_string(),
            location: non_blank(self.location),
            details_short: non_blank(self.details_short),
            details_long: non_blank(self.details_long),
            staff_id,
            students_signed_up: self.students_signed_up,
            total_spaces,
            start_time,
            end_time,
            subject_ids,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn input() -> EventInput {
        EventInput {
            event_name: Some("Careers Fair".to_string()),
            staff_id: Some(StaffId(2)),
            total_spaces: Some(40),
            start_time: Some("2025-03-01T09:00".to_string()),
            end_time: Some("2025-03-01T12:30".to_string()),
            subject_ids: vec![SubjectId(1), SubjectId(1), SubjectId(4)],
            ..EventInput::default()
        }
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let local = parse_timestamp("2025-03-01T09:05").unwrap();
        assert_eq!((local.hour(), local.minute()), (9, 5));

        let with_secs = parse_timestamp("2025-03-01T09:05:30").unwrap();
        assert_eq!(with_secs.second(), 30);

        let rfc = parse_timestamp("2025-03-01T09:05:00+02:00").unwrap();
        assert_eq!(rfc.hour(), 7);

        let zulu = parse_timestamp("2025-12-31T23:59:59.000Z").unwrap();
        assert_eq!(zulu.day(), 31);

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_into_draft() {
        let draft = input().into_draft().unwrap();
        assert_eq!(draft.subject_ids, vec![SubjectId(1), SubjectId(4)]);
        assert_eq!(draft.students_signed_up, None);
        assert!(draft.location.is_none());
    }

    #[test]
    fn test_missing_fields() {
        for strip in 0..5 {
            let mut i = input();
            match strip {
                0 => i.event_name = None,
                1 => i.staff_id = None,
                2 => i.total_spaces = Some(0),
                3 => i.start_time = Some(" ".to_string()),
                _ => i.end_time = None,
            }
            let err = i.into_draft().unwrap_err();
            assert_eq!(err.message, "Missing required fields");
        }
    }

    #[test]
    fn test_end_before_start() {
        let mut i = input();
        i.end_time = Some("2025-03-01T08:00".to_string());
        let err = i.into_draft().unwrap_err();
        assert_eq!(err.message, "End time must be after start time");
    }
}
