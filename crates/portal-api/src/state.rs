//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use portal_auth::invitation::InvitationCodeGenerator;
use portal_auth::jwt::{JwtDecoder, JwtEncoder};
use portal_auth::password::PasswordHasher;
use portal_core::config::AppConfig;
use portal_database::Database;
use portal_service::{AuthService, DirectoryService, EventService, InvitationService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store handle (PostgreSQL or in-memory)
    pub db: Database,

    // ── Services ─────────────────────────────────────────────
    /// Login, registration, verify, refresh
    pub auth_service: AuthService,
    /// Invitation token issuance
    pub invitation_service: InvitationService,
    /// Event registry
    pub event_service: EventService,
    /// Staff and subject listings
    pub directory_service: DirectoryService,
}

impl AppState {
    /// Wires every service from configuration and a connected database.
    pub fn new(config: AppConfig, db: Database) -> Self {
        let password_hasher = Arc::new(PasswordHasher::new());
        let jwt_encoder = Arc::new(JwtEncoder::new(&config));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config));
        let code_generator = Arc::new(InvitationCodeGenerator::new());

        Self {
            auth_service: AuthService::new(
                db.clone(),
                password_hasher,
                jwt_encoder,
                jwt_decoder,
            ),
            invitation_service: InvitationService::new(db.clone(), code_generator),
            event_service: EventService::new(db.clone()),
            directory_service: DirectoryService::new(db.clone()),
            config: Arc::new(config),
            db,
        }
    }
}
