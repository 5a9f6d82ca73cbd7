//! # portal-database
//!
//! Store traits for every persisted entity, their PostgreSQL repositories,
//! an in-process backend for development and tests, and the [`Database`]
//! handle that dispatches to whichever backend is configured.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use provider::Database;
pub use store::{EventStore, InvitationStore, StaffStore, SubjectStore};
