//! Storage interfaces for accounts, threads and photos.
//!
//! Every mutating method is a single atomic operation against the backend.
//! Callers never read a document, change it in memory and write it back:
//! the decision and the write happen together inside the store, so two
//! concurrent requests against the same document cannot lose each other's
//! update.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tfy_types::{
    Comment, CommentId, LikeToggle, Photo, PhotoMeta, PhotoRef, SessionToken, Thread, ThreadId,
    ThreadPatch, User, UserId,
};

use crate::error::StoreResult;

/// Credential store: user accounts indexed by id, email and current token.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` if the email is taken.
    async fn insert(&self, user: User) -> StoreResult<()>;

    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// The account whose current token equals `token`, if any.
    async fn find_by_token(&self, token: &SessionToken) -> StoreResult<Option<User>>;

    /// Replace the account's current token (or clear it with `None`).
    ///
    /// The previous token stops resolving in the same atomic step.
    async fn set_token(&self, id: &UserId, token: Option<SessionToken>) -> StoreResult<()>;

    async fn set_password_hash(&self, id: &UserId, hashed_password: String) -> StoreResult<()>;

    /// Point the account at a new profile photo, returning the previous one.
    async fn set_profile_photo(
        &self,
        id: &UserId,
        photo: Option<PhotoRef>,
    ) -> StoreResult<Option<PhotoRef>>;
}

/// Thread documents with their embedded comments and likes.
///
/// Methods that target a thread return `None`/`false` when it does not exist
/// rather than an error; a missing thread is an ordinary outcome.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    async fn insert(&self, thread: Thread) -> StoreResult<()>;

    async fn find(&self, id: &ThreadId) -> StoreResult<Option<Thread>>;

    /// All threads, oldest first.
    async fn list(&self) -> StoreResult<Vec<Thread>>;

    /// Apply a whitelisted patch and return the updated thread.
    async fn apply_patch(&self, id: &ThreadId, patch: &ThreadPatch) -> StoreResult<Option<Thread>>;

    /// Delete the thread and everything embedded in it.
    async fn delete(&self, id: &ThreadId) -> StoreResult<bool>;

    /// Append a comment. Returns `false` if the thread does not exist.
    async fn push_comment(&self, id: &ThreadId, comment: Comment) -> StoreResult<bool>;

    /// Remove a comment, returning it. `None` if the thread or comment is gone.
    async fn pull_comment(&self, id: &ThreadId, comment: &CommentId) -> StoreResult<Option<Comment>>;

    /// Pull `user`'s like if present, otherwise push a new one stamped `at`.
    async fn toggle_like(
        &self,
        id: &ThreadId,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<LikeToggle>>;
}

/// Profile photo bytes and metadata keyed by content reference.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store a photo. Idempotent for identical content from the same owner.
    async fn put(&self, photo: Photo) -> StoreResult<PhotoMeta>;

    async fn get(&self, reference: &PhotoRef) -> StoreResult<Option<Photo>>;

    /// Delete a photo. Returns `true` if it existed.
    async fn delete(&self, reference: &PhotoRef) -> StoreResult<bool>;
}
