//! Event entities and the listing projection.

pub mod listing;
pub mod model;

pub use listing::{EventListing, sign_up_percentage};
pub use model::{Event, EventDraft, EventWithStaff};
