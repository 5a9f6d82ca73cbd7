//! Access-level enforcement.

pub mod enforcer;

pub use enforcer::{ADMIN_REQUIRED, require_admin};
