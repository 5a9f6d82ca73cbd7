//! Read access to the staff directory and subject catalogue, plus the
//! operator-side writes used to seed them.

use tracing::info;

use portal_core::error::AppError;
use portal_core::types::{StaffId, SubjectId};
use portal_database::Database;
use portal_entity::staff::StaffSummary;
use portal_entity::subject::{NewSubject, Subject};

/// Staff and subject listings.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    /// Store handle.
    db: Database,
}

impl DirectoryService {
    /// Creates a new directory service.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All staff, ordered by firstname then surname.
    pub async fn list_staff(&self) -> Result<Vec<StaffSummary>, AppError> {
        self.db.staff().list().await
    }

    /// All subjects, ordered by name.
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, AppError> {
        self.db.subjects().list().await
    }

    /// Adds a subject to the catalogue.
    pub async fn add_subject(&self, data: NewSubject) -> Result<Subject, AppError> {
        if data.name.trim().is_empty() || data.code.trim().is_empty() {
            return Err(AppError::validation("Subject name and code are required"));
        }
        let subject = self.db.subjects().create(&data).await?;
        info!(subject_id = %subject.id, code = %subject.code, "Subject added");
        Ok(subject)
    }

    /// Links a subject to a staff member.
    pub async fn assign_subject(
        &self,
        staff_id: StaffId,
        subject_id: SubjectId,
    ) -> Result<(), AppError> {
        self.db.subjects().assign_to_staff(staff_id, subject_id).await?;
        info!(staff_id = %staff_id, subject_id = %subject_id, "Subject assigned");
        Ok(())
    }
}
