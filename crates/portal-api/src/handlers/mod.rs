//! HTTP request handlers, grouped by domain.

pub mod auth;
pub mod directory;
pub mod events;
pub mod health;
