//! Invitation token repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_entity::invitation::{InvitationToken, NewInvitation};
use portal_entity::staff::{NewStaff, StaffAccount};

use super::staff::insert_staff;
use crate::store::InvitationStore;

/// Repository for invitation tokens.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Create a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationStore for InvitationRepository {
    async fn exists(&self, code: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM invitation_tokens WHERE token = $1)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check token", e))
    }

    async fn insert(&self, data: &NewInvitation) -> AppResult<InvitationToken> {
        sqlx::query_as::<_, InvitationToken>(
            "INSERT INTO invitation_tokens (token, created_by, created_at, expires_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.code.as_str())
        .bind(data.created_by)
        .bind(data.created_at)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("invitation_tokens_token_key") =>
            {
                AppError::conflict("Token already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to store token", e),
        })
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<InvitationToken>> {
        sqlx::query_as::<_, InvitationToken>("SELECT * FROM invitation_tokens WHERE token = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find token", e))
    }

    async fn redeem(
        &self,
        code: &str,
        staff: &NewStaff,
        now: DateTime<Utc>,
    ) -> AppResult<StaffAccount> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let consumed = sqlx::query(
            "UPDATE invitation_tokens SET used = TRUE, used_by = $2, used_at = $3 \
             WHERE token = $1 AND used = FALSE AND expires_at >= $3",
        )
        .bind(code)
        .bind(&staff.email)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to consume token", e))?;

        if consumed.rows_affected() == 0 {
            debug!(token = %code, "Token no longer redeemable, rolling back");
            return Err(AppError::conflict("This token has already been used"));
        }

        let account = insert_staff(&mut *tx, staff).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit registration", e)
        })?;

        Ok(account)
    }

    async fn list(&self) -> AppResult<Vec<InvitationToken>> {
        sqlx::query_as::<_, InvitationToken>(
            "SELECT * FROM invitation_tokens ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tokens", e))
    }
}
