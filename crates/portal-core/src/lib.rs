//! # portal-core
//!
//! Core crate for the staff portal. Contains configuration schemas,
//! typed identifiers, the unified error system, and its HTTP response
//! mapping.
//!
//! This crate has **no** internal dependencies on other portal crates.

pub mod config;
pub mod error;
pub mod response;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
