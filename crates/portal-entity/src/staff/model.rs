//! Staff account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use portal_core::types::StaffId;

use super::access_level::AccessLevel;

/// A registered staff member.
///
/// The password hash is never serialized, so the struct can be returned
/// from handlers as-is.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffAccount {
    /// Unique staff identifier.
    pub id: StaffId,
    /// Login email (unique).
    pub email: String,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub surname: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Authorization level.
    #[serde(rename = "accessLevel")]
    pub access_level: AccessLevel,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login: Option<DateTime<Utc>>,
}

impl StaffAccount {
    /// "Firstname Surname".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.surname)
    }
}

/// Data required to create a new staff account.
#[derive(Debug, Clone)]
pub struct NewStaff {
    /// Login email.
    pub email: String,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub surname: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned level.
    pub access_level: AccessLevel,
}

/// Public directory entry used by the staff listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffSummary {
    /// Staff identifier.
    pub id: StaffId,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub surname: String,
    /// Login email.
    pub email: String,
    /// Authorization level.
    #[serde(rename = "accessLevel")]
    pub access_level: AccessLevel,
}

impl From<&StaffAccount> for StaffSummary {
    fn from(staff: &StaffAccount) -> Self {
        Self {
            id: staff.id,
            firstname: staff.firstname.clone(),
            surname: staff.surname.clone(),
            email: staff.email.clone(),
            access_level: staff.access_level,
        }
    }
}
