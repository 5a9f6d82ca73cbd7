//! # portal-auth
//!
//! Authentication and authorization building blocks for the staff portal.
//!
//! ## Modules
//!
//! - `jwt`: session token issuing, verification, and rejection reasons
//! - `password`: Argon2id password hashing
//! - `invitation`: random invitation code generation
//! - `rbac`: access-level guards
//! - `session`: client-side inactivity and refresh state machine

pub mod invitation;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use invitation::InvitationCodeGenerator;
pub use jwt::{JwtDecoder, JwtEncoder, SessionClaims, SessionIdentity, TokenRejection};
pub use password::PasswordHasher;
pub use rbac::require_admin;
pub use session::{MonitorAction, MonitorSettings, SessionMonitor};
