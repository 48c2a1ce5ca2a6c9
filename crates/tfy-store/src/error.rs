use tfy_types::UserId;

/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An account with this email already exists.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// A user-level mutation targeted an account that does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// A lock guarding the backing map was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// The storage backend failed or is unavailable.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
