//! Authentication service: login, registration, verification, and refresh.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use portal_auth::jwt::{
    IssuedToken, JwtDecoder, JwtEncoder, SessionClaims, SessionIdentity, TokenRejection,
};
use portal_auth::password::PasswordHasher;
use portal_core::error::AppError;
use portal_database::Database;
use portal_entity::invitation::{InvitationCode, InvitationStatus};
use portal_entity::staff::{AccessLevel, NewStaff, StaffAccount};
use portal_entity::subject::SubjectRef;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The account, with `last_login` updated.
    pub staff: StaffAccount,
    /// Subjects linked to the account.
    pub subjects: Vec<SubjectRef>,
    /// The new session token.
    pub token: IssuedToken,
}

/// Registration form fields as submitted.
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub surname: String,
    /// Invitation code.
    pub token: String,
}

impl RegisterInput {
    fn has_blank_field(&self) -> bool {
        [
            &self.email,
            &self.password,
            &self.firstname,
            &self.surname,
            &self.token,
        ]
        .iter()
        .any(|f| f.trim().is_empty())
    }
}

/// Handles credential checks and session token lifecycle.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// Store handle.
    db: Database,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token signer.
    encoder: Arc<JwtEncoder>,
    /// Token verifier.
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        db: Database,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            db,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Checks credentials and issues a session token.
    ///
    /// Unknown email, wrong password, and an unreadable stored hash all
    /// produce the same error so accounts cannot be enumerated.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let invalid = || AppError::unauthenticated("Invalid email or password");

        let Some(mut staff) = self.db.staff().find_by_email(email.trim()).await? else {
            info!(email = %email, "Login failed: unknown email");
            return Err(invalid());
        };

        match self.hasher.verify_password(password, &staff.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                info!(staff_id = %staff.id, "Login failed: wrong password");
                return Err(invalid());
            }
            Err(e) => {
                warn!(staff_id = %staff.id, error = %e, "Login failed: stored hash unreadable");
                return Err(invalid());
            }
        }

        let now = Utc::now();
        self.db.staff().touch_last_login(staff.id, now).await?;
        staff.last_login = Some(now);

        let subjects = self.db.staff().subjects_for(staff.id).await?;
        let token = self.encoder.issue(&SessionIdentity::from(&staff))?;

        info!(staff_id = %staff.id, "Staff logged in");

        Ok(LoginOutcome {
            staff,
            subjects,
            token,
        })
    }

    /// Creates a staff account by consuming an invitation.
    ///
    /// Checks run in this order: all fields present, code format, email
    /// free, code exists, code unused, code unexpired. The consumption and
    /// the insert then commit together.
    pub async fn register(&self, input: RegisterInput) -> Result<StaffAccount, AppError> {
        if input.has_blank_field() {
            return Err(AppError::validation("All fields are required"));
        }

        let code: InvitationCode = input.token.trim().parse()?;
        let email = input.email.trim().to_string();

        if self.db.staff().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already in use"));
        }

        let now = Utc::now();
        let invitation = self
            .db
            .invitations()
            .find_by_code(code.as_str())
            .await?
            .ok_or_else(|| AppError::validation("Invalid token"))?;

        match invitation.status_at(now) {
            InvitationStatus::Used => {
                return Err(AppError::validation("This token has already been used"));
            }
            InvitationStatus::Expired => {
                return Err(AppError::validation("This token has expired"));
            }
            InvitationStatus::Available => {}
        }

        let new_staff = NewStaff {
            email,
            firstname: input.firstname.trim().to_string(),
            surname: input.surname.trim().to_string(),
            password_hash: self.hasher.hash_password(&input.password)?,
            access_level: AccessLevel::Staff,
        };

        let staff = self
            .db
            .invitations()
            .redeem(code.as_str(), &new_staff, now)
            .await?;

        info!(staff_id = %staff.id, email = %staff.email, token = %code, "Staff account registered");

        Ok(staff)
    }

    /// Verifies a token taken from the request.
    pub fn verify(&self, token: Option<&str>) -> Result<SessionClaims, AppError> {
        let token = token.ok_or(TokenRejection::Missing)?;
        Ok(self.decoder.verify(token)?)
    }

    /// Verifies a token and reissues it with the same identity and a fresh expiry.
    ///
    /// Claims carry whole seconds, so the new issuance time is at least one
    /// second after the old one and the expiry always moves forward.
    pub fn refresh(&self, token: Option<&str>) -> Result<IssuedToken, AppError> {
        let claims = self.verify(token)?;
        let issued_at = Utc::now().max(claims.issued_at() + chrono::Duration::seconds(1));
        let issued = self.encoder.issue_at(&claims.identity, issued_at)?;
        info!(staff_id = %claims.identity.user_id, "Session token refreshed");
        Ok(issued)
    }
}
