//! Invitation code generation.

pub mod generator;

pub use generator::InvitationCodeGenerator;
