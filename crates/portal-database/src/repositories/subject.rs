//! Subject repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::types::{StaffId, SubjectId};
use portal_entity::subject::{NewSubject, Subject};

use crate::store::SubjectStore;

/// Repository for subjects and staff-subject links.
#[derive(Debug, Clone)]
pub struct SubjectRepository {
    pool: PgPool,
}

impl SubjectRepository {
    /// Create a new subject repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectStore for SubjectRepository {
    async fn list(&self) -> AppResult<Vec<Subject>> {
        sqlx::query_as::<_, Subject>("SELECT id, name, code, description FROM subjects ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list subjects", e))
    }

    async fn create(&self, data: &NewSubject) -> AppResult<Subject> {
        sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (name, code, description) VALUES ($1, $2, $3) \
             RETURNING id, name, code, description",
        )
        .bind(&data.name)
        .bind(&data.code)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("subjects_code_key") => {
                AppError::conflict(format!("Subject code '{}' already exists", data.code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create subject", e),
        })
    }

    async fn assign_to_staff(&self, staff_id: StaffId, subject_id: SubjectId) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO staff_subjects (staff_id, subject_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(staff_id)
        .bind(subject_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found("Staff member or subject not found")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to assign subject", e),
        })?;
        Ok(())
    }
}
