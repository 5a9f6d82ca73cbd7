//! One-time invitation tokens gating new-account registration.

pub mod code;
pub mod model;

pub use code::{InvitationCode, InvitationLifespan};
pub use model::{InvitationStatus, InvitationToken, NewInvitation};
