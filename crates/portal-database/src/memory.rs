//! In-process backend used for development and integration tests.
//!
//! Every table lives behind one `tokio::sync::Mutex`, so each store call
//! (including registration and event writes) is applied atomically.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_core::types::{EventId, InvitationId, StaffId, SubjectId};
use portal_entity::event::{Event, EventDraft, EventListing, EventWithStaff};
use portal_entity::invitation::{InvitationStatus, InvitationToken, NewInvitation};
use portal_entity::staff::{NewStaff, StaffAccount, StaffSummary};
use portal_entity::subject::{NewSubject, Subject, SubjectRef};

use crate::store::{EventStore, InvitationStore, StaffStore, SubjectStore};

#[derive(Debug, Default)]
struct Tables {
    staff: Vec<StaffAccount>,
    subjects: Vec<Subject>,
    staff_subjects: Vec<(StaffId, SubjectId)>,
    invitations: Vec<InvitationToken>,
    events: Vec<Event>,
    event_subjects: Vec<(EventId, SubjectId)>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn email_taken(&self, email: &str) -> bool {
        self.staff.iter().any(|s| s.email.eq_ignore_ascii_case(email))
    }

    fn insert_staff(&mut self, data: &NewStaff) -> AppResult<StaffAccount> {
        if self.email_taken(&data.email) {
            return Err(AppError::conflict("Email already in use"));
        }
        let now = Utc::now();
        let account = StaffAccount {
            id: StaffId(self.next_id()),
            email: data.email.clone(),
            firstname: data.firstname.clone(),
            surname: data.surname.clone(),
            password_hash: data.password_hash.clone(),
            access_level: data.access_level,
            created_at: now,
            updated_at: now,
            last_login: None,
        };
        self.staff.push(account.clone());
        Ok(account)
    }

    fn subject_ref(&self, id: SubjectId) -> Option<SubjectRef> {
        self.subjects.iter().find(|s| s.id == id).map(SubjectRef::from)
    }

    fn check_references(&self, draft: &EventDraft) -> AppResult<()> {
        let staff_ok = self.staff.iter().any(|s| s.id == draft.staff_id);
        let subjects_ok = draft
            .subject_ids
            .iter()
            .all(|id| self.subjects.iter().any(|s| s.id == *id));
        if staff_ok && subjects_ok {
            Ok(())
        } else {
            Err(AppError::validation(
                "Assigned staff member or subject does not exist",
            ))
        }
    }

    fn link_subjects(&mut self, id: EventId, draft: &EventDraft) {
        for subject_id in &draft.subject_ids {
            if !self.event_subjects.contains(&(id, *subject_id)) {
                self.event_subjects.push((id, *subject_id));
            }
        }
    }
}

/// Backend that keeps all rows in memory. Data is lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StaffStore for MemoryDatabase {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<StaffAccount>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .staff
            .iter()
            .find(|s| s.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<StaffSummary>> {
        let tables = self.tables.lock().await;
        let mut staff: Vec<StaffSummary> = tables.staff.iter().map(StaffSummary::from).collect();
        staff.sort_by(|a, b| {
            a.firstname
                .cmp(&b.firstname)
                .then_with(|| a.surname.cmp(&b.surname))
        });
        Ok(staff)
    }

    async fn touch_last_login(&self, id: StaffId, at: DateTime<Utc>) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        if let Some(staff) = tables.staff.iter_mut().find(|s| s.id == id) {
            staff.last_login = Some(at);
        }
        Ok(())
    }

    async fn subjects_for(&self, id: StaffId) -> AppResult<Vec<SubjectRef>> {
        let tables = self.tables.lock().await;
        let mut subjects: Vec<SubjectRef> = tables
            .staff_subjects
            .iter()
            .filter(|(staff_id, _)| *staff_id == id)
            .filter_map(|(_, subject_id)| tables.subject_ref(*subject_id))
            .collect();
        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subjects)
    }

    async fn create(&self, data: &NewStaff) -> AppResult<StaffAccount> {
        self.tables.lock().await.insert_staff(data)
    }
}

#[async_trait]
impl InvitationStore for MemoryDatabase {
    async fn exists(&self, code: &str) -> AppResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.invitations.iter().any(|t| t.token == code))
    }

    async fn insert(&self, data: &NewInvitation) -> AppResult<InvitationToken> {
        let mut tables = self.tables.lock().await;
        if tables.invitations.iter().any(|t| t.token == data.code.as_str()) {
            return Err(AppError::conflict("Token already exists"));
        }
        let token = InvitationToken {
            id: InvitationId(tables.next_id()),
            token: data.code.to_string(),
            created_by: Some(data.created_by),
            created_at: data.created_at,
            expires_at: data.expires_at,
            used: false,
            used_by: None,
            used_at: None,
        };
        tables.invitations.push(token.clone());
        Ok(token)
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<InvitationToken>> {
        let tables = self.tables.lock().await;
        Ok(tables.invitations.iter().find(|t| t.token == code).cloned())
    }

    async fn redeem(
        &self,
        code: &str,
        staff: &NewStaff,
        now: DateTime<Utc>,
    ) -> AppResult<StaffAccount> {
        let mut tables = self.tables.lock().await;

        let index = tables
            .invitations
            .iter()
            .position(|t| t.token == code && t.status_at(now) == InvitationStatus::Available)
            .ok_or_else(|| {
                debug!(token = %code, "Token no longer redeemable");
                AppError::conflict("This token has already been used")
            })?;

        let account = tables.insert_staff(staff)?;

        let token = &mut tables.invitations[index];
        token.used = true;
        token.used_by = Some(staff.email.clone());
        token.used_at = Some(now);

        Ok(account)
    }

    async fn list(&self) -> AppResult<Vec<InvitationToken>> {
        let tables = self.tables.lock().await;
        let mut tokens = tables.invitations.clone();
        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tokens)
    }
}

#[async_trait]
impl EventStore for MemoryDatabase {
    async fn list(&self) -> AppResult<Vec<EventListing>> {
        let tables = self.tables.lock().await;
        let mut events = tables.events.clone();
        events.sort_by(|a, b| b.start_time.cmp(&a.start_time));

        Ok(events
            .into_iter()
            .map(|event| {
                let staff_name = event
                    .staff_assigned
                    .and_then(|id| tables.staff.iter().find(|s| s.id == id))
                    .map(StaffAccount::full_name);
                let mut subjects: Vec<SubjectRef> = tables
                    .event_subjects
                    .iter()
                    .filter(|(event_id, _)| *event_id == event.event_id)
                    .filter_map(|(_, subject_id)| tables.subject_ref(*subject_id))
                    .collect();
                subjects.sort_by(|a, b| a.name.cmp(&b.name));
                EventListing::new(EventWithStaff { event, staff_name }, subjects)
            })
            .collect())
    }

    async fn create(&self, draft: &EventDraft) -> AppResult<EventId> {
        let mut tables = self.tables.lock().await;
        tables.check_references(draft)?;

        let now = Utc::now();
        let id = EventId(tables.next_id());
        tables.events.push(Event {
            event_id: id,
            event_name: draft.event_name.clone(),
            location: draft.location.clone(),
            details_short: draft.details_short.clone(),
            details_long: draft.details_long.clone(),
            staff_assigned: Some(draft.staff_id),
            students_signed_up: draft.students_signed_up.unwrap_or(0),
            total_spaces: draft.total_spaces,
            start_time: draft.start_time,
            end_time: draft.end_time,
            created_at: now,
            updated_at: now,
        });
        tables.link_subjects(id, draft);
        Ok(id)
    }

    async fn update(&self, id: EventId, draft: &EventDraft) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if !tables.events.iter().any(|e| e.event_id == id) {
            return Ok(false);
        }
        tables.check_references(draft)?;

        if let Some(event) = tables.events.iter_mut().find(|e| e.event_id == id) {
            event.event_name = draft.event_name.clone();
            event.location = draft.location.clone();
            event.details_short = draft.details_short.clone();
            event.details_long = draft.details_long.clone();
            event.staff_assigned = Some(draft.staff_id);
            if let Some(signed_up) = draft.students_signed_up {
                event.students_signed_up = signed_up;
            }
            event.total_spaces = draft.total_spaces;
            event.start_time = draft.start_time;
            event.end_time = draft.end_time;
            event.updated_at = Utc::now();
        }
        tables.event_subjects.retain(|(event_id, _)| *event_id != id);
        tables.link_subjects(id, draft);
        Ok(true)
    }

    async fn delete(&self, id: EventId) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.events.len();
        tables.events.retain(|e| e.event_id != id);
        if tables.events.len() == before {
            return Ok(false);
        }
        tables.event_subjects.retain(|(event_id, _)| *event_id != id);
        Ok(true)
    }
}

#[async_trait]
impl SubjectStore for MemoryDatabase {
    async fn list(&self) -> AppResult<Vec<Subject>> {
        let tables = self.tables.lock().await;
        let mut subjects = tables.subjects.clone();
        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subjects)
    }

    async fn create(&self, data: &NewSubject) -> AppResult<Subject> {
        let mut tables = self.tables.lock().await;
        if tables.subjects.iter().any(|s| s.code == data.code) {
            return Err(AppError::conflict(format!(
                "Subject code '{}' already exists",
                data.code
            )));
        }
        let subject = Subject {
            id: SubjectId(tables.next_id()),
            name: data.name.clone(),
            code: data.code.clone(),
            description: data.description.clone(),
        };
        tables.subjects.push(subject.clone());
        Ok(subject)
    }

    async fn assign_to_staff(&self, staff_id: StaffId, subject_id: SubjectId) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        let staff_ok = tables.staff.iter().any(|s| s.id == staff_id);
        let subject_ok = tables.subjects.iter().any(|s| s.id == subject_id);
        if !staff_ok || !subject_ok {
            return Err(AppError::not_found("Staff member or subject not found"));
        }
        if !tables.staff_subjects.contains(&(staff_id, subject_id)) {
            tables.staff_subjects.push((staff_id, subject_id));
        }
        Ok(())
    }
}
