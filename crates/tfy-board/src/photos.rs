use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tfy_store::{PhotoStore, UserStore};
use tfy_types::{Identity, Photo, PhotoMeta, UserId};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::error::{BoardError, BoardResult};
use crate::requests::PhotoUpload;

/// Default upload cap: 5 MiB.
pub const DEFAULT_MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

type UserLocks = Arc<Mutex<HashMap<UserId, Arc<AsyncMutex<()>>>>>;

/// One profile photo per account.
///
/// Swapping the profile reference and dropping the replaced bytes are two
/// store calls, so uploads and removals for the same account hold a
/// per-account lock across both.
#[derive(Clone)]
pub struct PhotoService {
    users: Arc<dyn UserStore>,
    photos: Arc<dyn PhotoStore>,
    max_bytes: usize,
    locks: UserLocks,
}

/// `image/png; charset=x` -> `image/png`, lowercased.
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

impl PhotoService {
    pub fn new(users: Arc<dyn UserStore>, photos: Arc<dyn PhotoStore>, max_bytes: usize) -> Self {
        Self {
            users,
            photos,
            max_bytes,
            locks: UserLocks::default(),
        }
    }

    async fn lock_account(&self, user: &UserId) -> BoardResult<OwnedMutexGuard<()>> {
        let cell = {
            let mut locks = self
                .locks
                .lock()
                .map_err(|e| BoardError::Internal(format!("photo lock poisoned: {e}")))?;
            Arc::clone(locks.entry(*user).or_default())
        };
        Ok(cell.lock_owned().await)
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Store `upload` as the caller's profile photo, dropping any previous one.
    pub async fn upload(&self, caller: &Identity, upload: PhotoUpload) -> BoardResult<PhotoMeta> {
        let content_type = media_type(&upload.content_type);
        if !content_type.starts_with("image/") || content_type.len() == "image/".len() {
            return Err(BoardError::BadRequest(format!(
                "unsupported content type {content_type:?}, expected image/*"
            )));
        }
        if upload.data.is_empty() {
            return Err(BoardError::BadRequest("photo body is empty".into()));
        }
        if upload.data.len() > self.max_bytes {
            return Err(BoardError::PayloadTooLarge {
                limit: self.max_bytes,
                actual: upload.data.len(),
            });
        }

        let filename = upload.filename.filter(|name| !name.trim().is_empty());
        let photo = Photo::new(caller.id, filename, content_type, upload.data);

        let _guard = self.lock_account(&caller.id).await?;
        let meta = self.photos.put(photo).await?;

        let previous = self
            .users
            .set_profile_photo(&caller.id, Some(meta.reference))
            .await?;
        if let Some(old) = previous.filter(|old| *old != meta.reference) {
            self.photos.delete(&old).await?;
        }
        tracing::info!(
            user = %caller.id.short_id(),
            photo = %meta.reference.short_hex(),
            size = meta.size,
            "profile photo uploaded"
        );
        Ok(meta)
    }

    /// The caller's current profile photo.
    pub async fn fetch(&self, caller: &Identity) -> BoardResult<Photo> {
        let user = self
            .users
            .find_by_id(&caller.id)
            .await?
            .ok_or(BoardError::InvalidToken)?;
        let reference = user
            .profile_photo
            .ok_or(BoardError::NotFound("profile photo"))?;
        self.photos
            .get(&reference)
            .await?
            .ok_or(BoardError::NotFound("profile photo"))
    }

    /// Clear the caller's profile photo. Safe to call when none is set.
    pub async fn remove(&self, caller: &Identity) -> BoardResult<()> {
        let _guard = self.lock_account(&caller.id).await?;
        if let Some(old) = self.users.set_profile_photo(&caller.id, None).await? {
            self.photos.delete(&old).await?;
            tracing::info!(user = %caller.id.short_id(), "profile photo removed");
        }
        Ok(())
    }
}
