//! Invitation code and lifespan value objects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use portal_core::AppError;

/// Number of hyphen-separated groups in an invitation code.
pub const CODE_GROUPS: usize = 4;

/// Letters per group.
pub const GROUP_LEN: usize = 4;

/// A human-typable invitation code of the form `abcd-efgh-ijkl-mnop`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvitationCode(String);

impl InvitationCode {
    /// Build a code from its groups. Each group must be four lowercase ASCII letters.
    pub fn from_groups(groups: &[String]) -> Result<Self, AppError> {
        groups.join("-").parse()
    }

    /// Borrow the code text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether `value` has the shape `[a-z]{4}-[a-z]{4}-[a-z]{4}-[a-z]{4}`.
    pub fn is_well_formed(value: &str) -> bool {
        let groups: Vec<&str> = value.split('-').collect();
        groups.len() == CODE_GROUPS
            && groups
                .iter()
                .all(|g| g.len() == GROUP_LEN && g.bytes().all(|b| b.is_ascii_lowercase()))
    }
}

impl FromStr for InvitationCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(AppError::validation("Invalid token format"))
        }
    }
}

impl TryFrom<String> for InvitationCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InvitationCode> for String {
    fn from(code: InvitationCode) -> Self {
        code.0
    }
}

impl fmt::Display for InvitationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allowed lifetimes for a freshly generated invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvitationLifespan {
    /// Valid for one day.
    OneDay,
    /// Valid for three days.
    ThreeDays,
    /// Valid for a week.
    SevenDays,
}

impl InvitationLifespan {
    /// Lifespan in whole days.
    pub fn days(&self) -> i64 {
        match self {
            Self::OneDay => 1,
            Self::ThreeDays => 3,
            Self::SevenDays => 7,
        }
    }

    /// Lifespan as a chrono duration.
    pub fn as_duration(&self) -> chrono::Duration {
        chrono::Duration::days(self.days())
    }
}

impl TryFrom<i64> for InvitationLifespan {
    type Error = AppError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        match days {
            1 => Ok(Self::OneDay),
            3 => Ok(Self::ThreeDays),
            7 => Ok(Self::SevenDays),
            _ => Err(AppError::validation(
                "Invalid lifespan. Must be 1, 3, or 7 days.",
            )),
        }
    }
}
