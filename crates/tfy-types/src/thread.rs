use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, LikeId, ThreadId, UserId};
use crate::user::Identity;

/// A like embedded in its parent thread.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: LikeId,
    pub liked_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// A comment embedded in its parent thread.
///
/// `author_id` is optional so records written without attribution can still
/// be read. Such comments cannot be deleted through the API because their
/// ownership cannot be established.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub author_id: Option<UserId>,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// A comment attributed to `author`.
    pub fn new(author: &Identity, text: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(),
            text: text.into(),
            author_id: Some(author.id),
            username: author.username.clone(),
            created_at: Utc::now(),
        }
    }
}

/// The thread aggregate root.
///
/// Comments and likes live only inside their thread; they are created,
/// mutated and dropped together with it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    pub text: String,
    pub owner_id: UserId,
    /// Owner's username at creation time. Never re-synced.
    pub username: Option<String>,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Thread {
    /// A fresh thread owned by `owner`.
    pub fn new(owner: &Identity, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ThreadId::new(),
            text: text.into(),
            owner_id: owner.id,
            username: owner.username.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The like left by `user`, if any.
    pub fn like_by(&self, user: &UserId) -> Option<&Like> {
        self.likes.iter().find(|like| like.liked_by == *user)
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// Flip `user`'s like on this thread.
    ///
    /// Removes the existing like if there is one, otherwise appends a new one
    /// stamped with `at`. Returns `true` when the user likes the thread after
    /// the call. Callers must hold the thread's write lock for the whole call.
    pub fn toggle_like(&mut self, user: UserId, at: DateTime<Utc>) -> bool {
        match self.likes.iter().position(|like| like.liked_by == user) {
            Some(index) => {
                self.likes.remove(index);
                false
            }
            None => {
                self.likes.push(Like {
                    id: LikeId::new(),
                    liked_by: user,
                    created_at: at,
                });
                true
            }
        }
    }

    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == *id)
    }

    /// Remove a comment by id, returning it if it was present.
    pub fn remove_comment(&mut self, id: &CommentId) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id == *id)?;
        Some(self.comments.remove(index))
    }

    /// Apply the whitelisted fields of `patch`.
    pub fn apply(&mut self, patch: &ThreadPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        self.updated_at = Utc::now();
    }
}

/// Result of toggling a like: whether the caller now likes the thread, and
/// the thread's like sequence after the toggle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    pub liked: bool,
    pub likes: Vec<Like>,
}

/// Fields a thread owner may change.
///
/// Ownership, identifiers and timestamps are not part of this type, so a
/// request body that carries them has them dropped during deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadPatch {
    #[serde(default)]
    pub text: Option<String>,
}

impl ThreadPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
    }
}
