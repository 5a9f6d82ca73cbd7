//! Event registry use cases.

pub mod input;
pub mod service;

pub use input::{EventInput, parse_timestamp};
pub use service::EventService;
