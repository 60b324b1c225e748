//! Credential lifecycles for adapters that cannot send a static key.
//!
//! # Responsibilities
//! - Cache OAuth client-credentials tokens until they expire (`token`)
//! - Sign requests with AWS Signature Version 4 (`sigv4`)

pub mod sigv4;
pub mod token;

pub use sigv4::SigningParams;
pub use token::{IssuedToken, TokenCache};
