//! Core type definitions used across the portal workspace.

pub mod id;

pub use id::*;
