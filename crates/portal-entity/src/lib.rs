//! # portal-entity
//!
//! Domain entity models for the staff portal. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod event;
pub mod invitation;
pub mod staff;
pub mod subject;
