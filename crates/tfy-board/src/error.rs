use std::fmt;

use tfy_crypto::CryptoError;
use tfy_gate::AuthError;
use tfy_store::StoreError;

/// Errors produced by board operations.
///
/// The first six variants are expected outcomes a client can cause; the rest
/// are internal failures.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid or missing bearer token")]
    InvalidToken,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("caller does not own this {0}")]
    Forbidden(&'static str),

    #[error("payload of {actual} bytes exceeds the {limit}-byte limit")]
    PayloadTooLarge { limit: usize, actual: usize },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for BoardError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => Self::InvalidToken,
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::Forbidden(kind) => Self::Forbidden(kind),
            AuthError::Store(e) => Self::Store(e),
            AuthError::Crypto(e) => Self::Crypto(e),
            AuthError::Config(msg) => Self::Config(msg),
        }
    }
}

impl PartialEq for BoardError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        fmt::format(format_args!("{self}")) == fmt::format(format_args!("{other}"))
    }
}

impl Eq for BoardError {}

/// Result alias for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
