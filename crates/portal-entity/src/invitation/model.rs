//! Invitation token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use portal_core::types::{InvitationId, StaffId};

use super::code::InvitationCode;

/// A persisted invitation token.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvitationToken {
    /// Row identifier.
    pub id: InvitationId,
    /// The code as issued (`abcd-efgh-ijkl-mnop`).
    pub token: String,
    /// Admin that generated the token.
    pub created_by: Option<StaffId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
    /// Whether the token has been consumed.
    pub used: bool,
    /// Email of the account that consumed it.
    pub used_by: Option<String>,
    /// When it was consumed.
    pub used_at: Option<DateTime<Utc>>,
}

/// Redeemability of an invitation at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    /// Unused and not yet expired.
    Available,
    /// Already consumed.
    Used,
    /// Past its expiry.
    Expired,
}

impl InvitationToken {
    /// Compute the status at `now`. A used token reports `Used` even once
    /// expired; expiry is strict (`now > expires_at`).
    pub fn status_at(&self, now: DateTime<Utc>) -> InvitationStatus {
        if self.used {
            InvitationStatus::Used
        } else if now > self.expires_at {
            InvitationStatus::Expired
        } else {
            InvitationStatus::Available
        }
    }
}

/// Data required to persist a new invitation.
#[derive(Debug, Clone)]
pub struct NewInvitation {
    /// Generated code.
    pub code: InvitationCode,
    /// Issuing admin.
    pub created_by: StaffId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}
