//! Random invitation code generator.

use rand::Rng;

use portal_core::error::AppError;
use portal_entity::invitation::InvitationCode;
use portal_entity::invitation::code::{CODE_GROUPS, GROUP_LEN};

/// Produces random `abcd-efgh-ijkl-mnop` codes from the thread-local RNG.
#[derive(Debug, Clone, Default)]
pub struct InvitationCodeGenerator;

impl InvitationCodeGenerator {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self
    }

    /// Generates one code. Uniqueness is the caller's concern.
    pub fn generate(&self) -> Result<InvitationCode, AppError> {
        let mut rng = rand::rng();
        let groups: Vec<String> = (0..CODE_GROUPS)
            .map(|_| {
                (0..GROUP_LEN)
                    .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
                    .collect()
            })
            .collect();
        InvitationCode::from_groups(&groups)
    }
}
