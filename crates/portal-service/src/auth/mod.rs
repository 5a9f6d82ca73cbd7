//! Login, registration, and session token use cases.

pub mod service;

pub use service::{AuthService, LoginOutcome, RegisterInput};
