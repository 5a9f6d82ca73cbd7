//! Staff repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::types::StaffId;
use portal_entity::staff::{NewStaff, StaffAccount, StaffSummary};
use portal_entity::subject::SubjectRef;

use crate::store::StaffStore;

const EMAIL_UNIQUE_INDEX: &str = "staff_email_lower_key";

/// Repository for staff accounts.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    /// Create a new staff repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert a staff row on any executor, so registration can run it inside
/// its transaction.
pub(crate) async fn insert_staff<'e, E>(executor: E, data: &NewStaff) -> AppResult<StaffAccount>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, StaffAccount>(
        "INSERT INTO staff (email, firstname, surname, password_hash, access_level) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING *",
    )
    .bind(&data.email)
    .bind(&data.firstname)
    .bind(&data.surname)
    .bind(&data.password_hash)
    .bind(data.access_level)
    .fetch_one(executor)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(EMAIL_UNIQUE_INDEX) => {
            AppError::conflict("Email already in use")
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to create staff account", e),
    })
}

#[async_trait]
impl StaffStore for StaffRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<StaffAccount>> {
        sqlx::query_as::<_, StaffAccount>("SELECT * FROM staff WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find staff by email", e)
            })
    }

    async fn list(&self) -> AppResult<Vec<StaffSummary>> {
        sqlx::query_as::<_, StaffSummary>(
            "SELECT id, firstname, surname, email, access_level FROM staff \
             ORDER BY firstname, surname",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list staff", e))
    }

    async fn touch_last_login(&self, id: StaffId, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE staff SET last_login = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;
        Ok(())
    }

    async fn subjects_for(&self, id: StaffId) -> AppResult<Vec<SubjectRef>> {
        sqlx::query_as::<_, SubjectRef>(
            "SELECT s.id, s.name, s.code FROM subjects s \
             JOIN staff_subjects ss ON ss.subject_id = s.id \
             WHERE ss.staff_id = $1 \
             ORDER BY s.name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load staff subjects", e)
        })
    }

    async fn create(&self, data: &NewStaff) -> AppResult<StaffAccount> {
        insert_staff(&self.pool, data).await
    }
}
