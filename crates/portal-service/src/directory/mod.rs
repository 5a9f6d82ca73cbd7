//! Staff and subject reference data.

pub mod service;

pub use service::DirectoryService;
