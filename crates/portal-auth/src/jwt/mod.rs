//! JWT session token encoding, decoding, and claims management.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod rejection;

pub use claims::{SessionClaims, SessionIdentity};
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};
pub use rejection::TokenRejection;
