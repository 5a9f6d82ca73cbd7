//! Storage traits implemented by every database backend.
//!
//! Handlers and services only see these traits, so the PostgreSQL
//! repositories and [`crate::MemoryDatabase`] are interchangeable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use portal_core::result::AppResult;
use portal_core::types::{EventId, StaffId, SubjectId};
use portal_entity::event::{EventDraft, EventListing};
use portal_entity::invitation::{InvitationToken, NewInvitation};
use portal_entity::staff::{NewStaff, StaffAccount, StaffSummary};
use portal_entity::subject::{NewSubject, Subject, SubjectRef};

/// Staff account persistence.
#[async_trait]
pub trait StaffStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an account by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<StaffAccount>>;

    /// List the directory ordered by firstname, then surname.
    async fn list(&self) -> AppResult<Vec<StaffSummary>>;

    /// Record a successful login.
    async fn touch_last_login(&self, id: StaffId, at: DateTime<Utc>) -> AppResult<()>;

    /// Subjects linked to a staff member, ordered by name.
    async fn subjects_for(&self, id: StaffId) -> AppResult<Vec<SubjectRef>>;

    /// Insert a new account. Fails with a conflict if the email is taken.
    async fn create(&self, data: &NewStaff) -> AppResult<StaffAccount>;
}

/// Invitation token persistence.
#[async_trait]
pub trait InvitationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether a code has ever been issued.
    async fn exists(&self, code: &str) -> AppResult<bool>;

    /// Persist a freshly generated invitation. Fails with a conflict on a
    /// duplicate code.
    async fn insert(&self, data: &NewInvitation) -> AppResult<InvitationToken>;

    /// Look up an invitation by its code.
    async fn find_by_code(&self, code: &str) -> AppResult<Option<InvitationToken>>;

    /// Atomically consume an available invitation and create the account.
    ///
    /// Either both writes commit or neither does. Fails with a conflict if
    /// the token was consumed or expired concurrently, or if the email is
    /// already registered.
    async fn redeem(
        &self,
        code: &str,
        staff: &NewStaff,
        now: DateTime<Utc>,
    ) -> AppResult<StaffAccount>;

    /// All invitations, newest first.
    async fn list(&self) -> AppResult<Vec<InvitationToken>>;
}

/// Event persistence.
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug + 'static {
    /// All events with staff names and subjects, latest start first.
    async fn list(&self) -> AppResult<Vec<EventListing>>;

    /// Insert an event and its subject links in one transaction.
    async fn create(&self, draft: &EventDraft) -> AppResult<EventId>;

    /// Overwrite an event and replace its subject links in one transaction.
    /// Returns `false` if no such event exists.
    async fn update(&self, id: EventId, draft: &EventDraft) -> AppResult<bool>;

    /// Delete an event and its subject links. Returns `false` if it did not exist.
    async fn delete(&self, id: EventId) -> AppResult<bool>;
}

/// Subject persistence.
#[async_trait]
pub trait SubjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// All subjects ordered by name.
    async fn list(&self) -> AppResult<Vec<Subject>>;

    /// Insert a subject. Fails with a conflict on a duplicate code.
    async fn create(&self, data: &NewSubject) -> AppResult<Subject>;

    /// Link a subject to a staff member. Linking twice is a no-op.
    async fn assign_to_staff(&self, staff_id: StaffId, subject_id: SubjectId) -> AppResult<()>;
}
