//! Database handle that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use portal_core::config::{DatabaseConfig, DatabaseProvider};
use portal_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryDatabase;
use crate::migration::run_migrations;
use crate::repositories::{
    EventRepository, InvitationRepository, StaffRepository, SubjectRepository,
};
use crate::store::{EventStore, InvitationStore, StaffStore, SubjectStore};

/// Shared handle to every store.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct Database {
    staff: Arc<dyn StaffStore>,
    invitations: Arc<dyn InvitationStore>,
    events: Arc<dyn EventStore>,
    subjects: Arc<dyn SubjectStore>,
    pool: Option<DatabasePool>,
}

impl Database {
    /// Connect to the configured backend, running migrations if enabled.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Initializing in-memory database");
                Ok(Self::memory(MemoryDatabase::new()))
            }
        }
    }

    /// Build a handle over PostgreSQL repositories.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            staff: Arc::new(StaffRepository::new(pg.clone())),
            invitations: Arc::new(InvitationRepository::new(pg.clone())),
            events: Arc::new(EventRepository::new(pg.clone())),
            subjects: Arc::new(SubjectRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Build a handle over an in-memory database (for development and testing).
    pub fn memory(db: MemoryDatabase) -> Self {
        Self {
            staff: Arc::new(db.clone()),
            invitations: Arc::new(db.clone()),
            events: Arc::new(db.clone()),
            subjects: Arc::new(db),
            pool: None,
        }
    }

    /// Staff accounts.
    pub fn staff(&self) -> &dyn StaffStore {
        self.staff.as_ref()
    }

    /// Invitation tokens.
    pub fn invitations(&self) -> &dyn InvitationStore {
        self.invitations.as_ref()
    }

    /// Events.
    pub fn events(&self) -> &dyn EventStore {
        self.events.as_ref()
    }

    /// Subjects.
    pub fn subjects(&self) -> &dyn SubjectStore {
        self.subjects.as_ref()
    }

    /// Check backend connectivity. The in-memory backend is always healthy.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release pooled connections.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
