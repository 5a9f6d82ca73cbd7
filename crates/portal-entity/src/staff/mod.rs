//! Staff account entities.

pub mod access_level;
pub mod model;

pub use access_level::AccessLevel;
pub use model::{NewStaff, StaffAccount, StaffSummary};
