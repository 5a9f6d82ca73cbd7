//! Access-level guard for administrator-only operations.

use portal_core::error::AppError;
use portal_entity::staff::AccessLevel;

/// Rejection message for invitation generation by non-admins.
pub const ADMIN_REQUIRED: &str = "Access denied. Admin required.";

/// Returns `Ok(())` for administrators, or a forbidden error carrying
/// `message` otherwise.
pub fn require_admin(level: AccessLevel, message: &str) -> Result<(), AppError> {
    if level.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden(message))
    }
}
