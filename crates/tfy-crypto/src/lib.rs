//! Cryptographic primitives for Threadify.
//!
//! Provides bcrypt password hashing and CSPRNG session-token generation.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod error;
pub mod password;
pub mod token;

pub use error::{CryptoError, CryptoResult};
pub use password::PasswordHasher;
pub use token::TokenGenerator;
