//! Invitation token generation and listing.

use std::sync::Arc;

use tracing::{debug, info};

use portal_auth::invitation::InvitationCodeGenerator;
use portal_auth::rbac::{ADMIN_REQUIRED, require_admin};
use portal_core::error::{AppError, ErrorKind};
use portal_database::Database;
use portal_entity::invitation::{InvitationLifespan, InvitationToken, NewInvitation};

use crate::context::RequestContext;

/// Upper bound on regeneration after a code collision.
const MAX_CODE_ATTEMPTS: usize = 16;

/// Issues single-use registration tokens.
#[derive(Debug, Clone)]
pub struct InvitationService {
    /// Store handle.
    db: Database,
    /// Code generator.
    generator: Arc<InvitationCodeGenerator>,
}

impl InvitationService {
    /// Creates a new invitation service.
    pub fn new(db: Database, generator: Arc<InvitationCodeGenerator>) -> Self {
        Self { db, generator }
    }

    /// Generates and stores a fresh invitation valid for `lifespan_days`.
    ///
    /// Only administrators may call this. A code that already exists is
    /// regenerated.
    pub async fn generate(
        &self,
        ctx: &RequestContext,
        lifespan_days: i64,
    ) -> Result<InvitationToken, AppError> {
        require_admin(ctx.access_level, ADMIN_REQUIRED)?;
        let lifespan = InvitationLifespan::try_from(lifespan_days)?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = self.generator.generate()?;
            if self.db.invitations().exists(code.as_str()).await? {
                debug!(attempt, "Invitation code collision, regenerating");
                continue;
            }

            let created_at = ctx.request_time;
            let data = NewInvitation {
                code,
                created_by: ctx.staff_id,
                created_at,
                expires_at: created_at + lifespan.as_duration(),
            };

            match self.db.invitations().insert(&data).await {
                Ok(token) => {
                    info!(
                        staff_id = %ctx.staff_id,
                        token = %token.token,
                        lifespan_days = lifespan.days(),
                        "Invitation token generated"
                    );
                    return Ok(token);
                }
                Err(e) if e.kind == ErrorKind::Conflict => {
                    debug!(attempt, "Invitation code inserted concurrently, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Could not generate a unique invitation token",
        ))
    }

    /// Lists every invitation, newest first. Admin only.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<InvitationToken>, AppError> {
        require_admin(ctx.access_level, ADMIN_REQUIRED)?;
        self.db.invitations().list().await
    }
}
