//! Event CRUD service.

use tracing::info;

use portal_auth::rbac::require_admin;
use portal_core::error::AppError;
use portal_core::types::EventId;
use portal_database::Database;
use portal_entity::event::EventListing;

use super::input::EventInput;
use crate::context::RequestContext;

/// Manages events and their subject links.
#[derive(Debug, Clone)]
pub struct EventService {
    /// Store handle.
    db: Database,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Lists all events, latest start first.
    pub async fn list(&self, _ctx: &RequestContext) -> Result<Vec<EventListing>, AppError> {
        self.db.events().list().await
    }

    /// Creates an event and links its subjects.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: EventInput,
    ) -> Result<EventId, AppError> {
        let draft = input.into_draft()?;
        let id = self.db.events().create(&draft).await?;
        info!(
            staff_id = %ctx.staff_id,
            event_id = %id,
            subjects = draft.subject_ids.len(),
            "Event created"
        );
        Ok(id)
    }

    /// Overwrites an event and replaces its subject links.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: EventId,
        input: EventInput,
    ) -> Result<(), AppError> {
        let draft = input.into_draft()?;
        if !self.db.events().update(id, &draft).await? {
            return Err(AppError::not_found("Event not found"));
        }
        info!(staff_id = %ctx.staff_id, event_id = %id, "Event updated");
        Ok(())
    }

    /// Deletes an event. Admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: EventId) -> Result<(), AppError> {
        require_admin(ctx.access_level, "Only administrators can delete events")?;

        if !self.db.events().delete(id).await? {
            return Err(AppError::not_found("Event not found"));
        }

        info!(staff_id = %ctx.staff_id, event_id = %id, "Event deleted");
        Ok(())
    }
}
