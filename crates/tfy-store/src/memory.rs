//! In-memory document stores for tests, local runs and embedding.
//!
//! Accounts live in one table behind a `RwLock` together with their email
//! and token indexes, so index maintenance is atomic with the record
//! change. Threads are held one `Mutex` per document: mutations on
//! different threads proceed in parallel, mutations on the same thread are
//! serialized. No lock is held across an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tfy_types::{
    Comment, CommentId, LikeToggle, Photo, PhotoMeta, PhotoRef, SessionToken, Thread, ThreadId,
    ThreadPatch, User, UserId,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::{PhotoStore, ThreadStore, UserStore};

fn poisoned(e: impl std::fmt::Display) -> StoreError {
    StoreError::LockPoisoned(e.to_string())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Default)]
struct UserTable {
    users: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
    by_token: HashMap<SessionToken, UserId>,
}

impl UserTable {
    fn user_mut(&mut self, id: &UserId) -> StoreResult<&mut User> {
        self.users.get_mut(id).ok_or(StoreError::UserNotFound(*id))
    }
}

/// In-memory implementation of [`UserStore`].
#[derive(Default)]
pub struct InMemoryUserStore {
    table: RwLock<UserTable>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.table.read().map_err(poisoned)?.users.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Number of tokens currently resolving to `id`.
    pub fn sessions_for(&self, id: &UserId) -> StoreResult<usize> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table.by_token.values().filter(|holder| *holder == id).count())
    }
}

impl std::fmt::Debug for InMemoryUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or_default();
        f.debug_struct("InMemoryUserStore")
            .field("user_count", &count)
            .finish()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> StoreResult<()> {
        let mut table = self.table.write().map_err(poisoned)?;
        if table.by_email.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        table.by_email.insert(user.email.clone(), user.id);
        if let Some(token) = &user.token {
            table.by_token.insert(token.clone(), user.id);
        }
        tracing::debug!(user = %user.id.short_id(), "account inserted");
        table.users.insert(user.id, user);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn find_by_token(&self, token: &SessionToken) -> StoreResult<Option<User>> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table
            .by_token
            .get(token)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn set_token(&self, id: &UserId, token: Option<SessionToken>) -> StoreResult<()> {
        let mut table = self.table.write().map_err(poisoned)?;
        if let Some(new) = &token {
            if table.by_token.get(new).is_some_and(|holder| holder != id) {
                return Err(StoreError::Backend("session token collision".into()));
            }
        }

        let user = table.user_mut(id)?;
        let previous = std::mem::replace(&mut user.token, token.clone());
        user.updated_at = Utc::now();

        if let Some(old) = previous {
            table.by_token.remove(&old);
        }
        if let Some(new) = token {
            table.by_token.insert(new, *id);
        }
        Ok(())
    }

    async fn set_password_hash(&self, id: &UserId, hashed_password: String) -> StoreResult<()> {
        let mut table = self.table.write().map_err(poisoned)?;
        let user = table.user_mut(id)?;
        user.hashed_password = hashed_password;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_profile_photo(
        &self,
        id: &UserId,
        photo: Option<PhotoRef>,
    ) -> StoreResult<Option<PhotoRef>> {
        let mut table = self.table.write().map_err(poisoned)?;
        let user = table.user_mut(id)?;
        user.updated_at = Utc::now();
        Ok(std::mem::replace(&mut user.profile_photo, photo))
    }
}

// ---------------------------------------------------------------------------
// Threads
// ---------------------------------------------------------------------------

type ThreadCell = Arc<Mutex<Thread>>;

/// In-memory implementation of [`ThreadStore`].
#[derive(Default)]
pub struct InMemoryThreadStore {
    threads: RwLock<HashMap<ThreadId, ThreadCell>>,
}

impl InMemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored threads.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.threads.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn cell(&self, id: &ThreadId) -> StoreResult<Option<ThreadCell>> {
        let map = self.threads.read().map_err(poisoned)?;
        Ok(map.get(id).cloned())
    }
}

fn lock(cell: &ThreadCell) -> StoreResult<MutexGuard<'_, Thread>> {
    cell.lock().map_err(poisoned)
}

impl std::fmt::Debug for InMemoryThreadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or_default();
        f.debug_struct("InMemoryThreadStore")
            .field("thread_count", &count)
            .finish()
    }
}

#[async_trait]
impl ThreadStore for InMemoryThreadStore {
    async fn insert(&self, thread: Thread) -> StoreResult<()> {
        let mut map = self.threads.write().map_err(poisoned)?;
        map.insert(thread.id, Arc::new(Mutex::new(thread)));
        Ok(())
    }

    async fn find(&self, id: &ThreadId) -> StoreResult<Option<Thread>> {
        match self.cell(id)? {
            Some(cell) => Ok(Some(lock(&cell)?.clone())),
            None => Ok(None),
        }
    }

    async fn list(&self) -> StoreResult<Vec<Thread>> {
        let cells: Vec<ThreadCell> = {
            let map = self.threads.read().map_err(poisoned)?;
            map.values().cloned().collect()
        };
        let mut threads = cells
            .iter()
            .map(|cell| lock(cell).map(|guard| Thread::clone(&guard)))
            .collect::<StoreResult<Vec<_>>>()?;
        threads.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(threads)
    }

    async fn apply_patch(&self, id: &ThreadId, patch: &ThreadPatch) -> StoreResult<Option<Thread>> {
        let Some(cell) = self.cell(id)? else {
            return Ok(None);
        };
        let mut thread = lock(&cell)?;
        thread.apply(patch);
        Ok(Some(thread.clone()))
    }

    async fn delete(&self, id: &ThreadId) -> StoreResult<bool> {
        let mut map = self.threads.write().map_err(poisoned)?;
        let removed = map.remove(id).is_some();
        if removed {
            tracing::debug!(thread = %id.short_id(), "thread removed");
        }
        Ok(removed)
    }

    async fn push_comment(&self, id: &ThreadId, comment: Comment) -> StoreResult<bool> {
        let Some(cell) = self.cell(id)? else {
            return Ok(false);
        };
        let mut thread = lock(&cell)?;
        thread.comments.push(comment);
        thread.updated_at = Utc::now();
        Ok(true)
    }

    async fn pull_comment(&self, id: &ThreadId, comment: &CommentId) -> StoreResult<Option<Comment>> {
        let Some(cell) = self.cell(id)? else {
            return Ok(None);
        };
        let mut thread = lock(&cell)?;
        let removed = thread.remove_comment(comment);
        if removed.is_some() {
            thread.updated_at = Utc::now();
        }
        Ok(removed)
    }

    async fn toggle_like(
        &self,
        id: &ThreadId,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<LikeToggle>> {
        let Some(cell) = self.cell(id)? else {
            return Ok(None);
        };
        let mut thread = lock(&cell)?;
        let liked = thread.toggle_like(*user, at);
        Ok(Some(LikeToggle {
            liked,
            likes: thread.likes.clone(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// In-memory implementation of [`PhotoStore`].
#[derive(Default)]
pub struct InMemoryPhotoStore {
    photos: RwLock<HashMap<PhotoRef, Photo>>,
}

impl InMemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes across all stored photos.
    pub fn total_bytes(&self) -> StoreResult<u64> {
        let map = self.photos.read().map_err(poisoned)?;
        Ok(map.values().map(|p| p.meta.size).sum())
    }
}

#[async_trait]
impl PhotoStore for InMemoryPhotoStore {
    async fn put(&self, photo: Photo) -> StoreResult<PhotoMeta> {
        let mut map = self.photos.write().map_err(poisoned)?;
        let stored = map.entry(photo.meta.reference).or_insert(photo);
        Ok(stored.meta.clone())
    }

    async fn get(&self, reference: &PhotoRef) -> StoreResult<Option<Photo>> {
        let map = self.photos.read().map_err(poisoned)?;
        Ok(map.get(reference).cloned())
    }

    async fn delete(&self, reference: &PhotoRef) -> StoreResult<bool> {
        let mut map = self.photos.write().map_err(poisoned)?;
        Ok(map.remove(reference).is_some())
    }
}
