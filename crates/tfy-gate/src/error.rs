use std::fmt;

use tfy_crypto::CryptoError;
use tfy_store::StoreError;

/// Errors raised while resolving a caller or checking what they may touch.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No bearer token, a malformed header, or a token that matches no
    /// account.
    #[error("invalid or missing bearer token")]
    InvalidToken,

    /// Email/password pair did not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The caller is authenticated but does not own the resource.
    #[error("caller does not own this {0}")]
    Forbidden(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PartialEq for AuthError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        fmt::format(format_args!("{self}")) == fmt::format(format_args!("{other}"))
    }
}

impl Eq for AuthError {}
