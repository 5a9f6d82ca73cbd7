//! Request context carrying the authenticated staff member.

use chrono::{DateTime, Utc};
use serde::Serialize;

use portal_auth::jwt::{SessionClaims, SessionIdentity};
use portal_core::types::StaffId;
use portal_entity::staff::{AccessLevel, StaffAccount};

/// Context for the current authenticated request.
///
/// Built from verified token claims and passed into service methods so
/// that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    /// The authenticated staff member's ID.
    pub staff_id: StaffId,
    /// Login email.
    pub email: String,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub surname: String,
    /// Access level at the time the token was issued.
    pub access_level: AccessLevel,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context from a verified identity.
    pub fn new(identity: SessionIdentity) -> Self {
        Self {
            staff_id: identity.user_id,
            email: identity.email,
            firstname: identity.firstname,
            surname: identity.surname,
            access_level: identity.access_level,
            request_time: Utc::now(),
        }
    }
}

impl From<SessionClaims> for RequestContext {
    fn from(claims: SessionClaims) -> Self {
        Self::new(claims.identity)
    }
}

impl From<&StaffAccount> for RequestContext {
    fn from(staff: &StaffAccount) -> Self {
        Self::new(SessionIdentity::from(staff))
    }
}
