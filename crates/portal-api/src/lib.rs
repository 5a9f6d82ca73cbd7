//! # portal-api
//!
//! HTTP API layer for the staff portal built on Axum.
//!
//! Provides all REST endpoints, middleware (CORS, request logging),
//! extractors, the session cookie, and DTOs. Error responses come from
//! `portal_core::response`.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use state::AppState;
