//! PostgreSQL implementations of the store traits.

pub mod event;
pub mod invitation;
pub mod staff;
pub mod subject;

pub use event::EventRepository;
pub use invitation::InvitationRepository;
pub use staff::StaffRepository;
pub use subject::SubjectRepository;
