//! Admin invitation token issuance.

pub mod service;

pub use service::InvitationService;
