//! # portal-service
//!
//! Business logic service layer for the staff portal. Each service
//! orchestrates the stores and auth primitives to implement one group of
//! use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time as cheap clonable handles.

pub mod auth;
pub mod context;
pub mod directory;
pub mod event;
pub mod invitation;

pub use auth::{AuthService, LoginOutcome, RegisterInput};
pub use context::RequestContext;
pub use directory::DirectoryService;
pub use event::{EventInput, EventService};
pub use invitation::InvitationService;
