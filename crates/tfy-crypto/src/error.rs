/// Errors from hashing and token generation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("bcrypt cost {0} out of range 4..=31")]
    InvalidCost(u32),

    #[error("token too short: need at least {min} bytes, got {actual}")]
    TokenTooShort { min: usize, actual: usize },

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Result alias for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
