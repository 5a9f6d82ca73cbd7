//! Subject reference data.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use portal_core::types::SubjectId;

/// A teaching subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subject {
    /// Subject identifier.
    pub id: SubjectId,
    /// Display name.
    pub name: String,
    /// Short code, e.g. `MATH101`.
    pub code: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// The compact `{id, name, code}` form embedded in events and login responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SubjectRef {
    /// Subject identifier.
    pub id: SubjectId,
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: String,
}

impl From<&Subject> for SubjectRef {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id,
            name: subject.name.clone(),
            code: subject.code.clone(),
        }
    }
}

/// Data required to create a subject.
#[derive(Debug, Clone)]
pub struct NewSubject {
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: String,
    /// Optional description.
    pub description: Option<String>,
}
