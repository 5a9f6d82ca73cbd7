//! JWT claims structure embedded in every session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use portal_core::types::StaffId;
use portal_entity::staff::{AccessLevel, StaffAccount};

/// The verified identity a session token vouches for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    /// Staff account id.
    pub user_id: StaffId,
    /// Login email.
    pub email: String,
    /// Access level at issuance time.
    pub access_level: AccessLevel,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub surname: String,
}

impl From<&StaffAccount> for SessionIdentity {
    fn from(staff: &StaffAccount) -> Self {
        Self {
            user_id: staff.id,
            email: staff.email.clone(),
            access_level: staff.access_level,
            firstname: staff.firstname.clone(),
            surname: staff.surname.clone(),
        }
    }
}

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity fields, flattened into the top-level claim set.
    #[serde(flatten)]
    pub identity: SessionIdentity,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Fixed marker distinguishing portal tokens from other tokens signed
    /// with the same secret.
    pub custom: String,
}

impl SessionClaims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Returns the issuance time as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_else(Utc::now)
    }
}
