use std::sync::Arc;

use tfy_gate::{AuthConfig, AuthProvider, Credentials, TokenAuthenticator};
use tfy_store::{
    InMemoryPhotoStore, InMemoryThreadStore, InMemoryUserStore, PhotoStore, ThreadStore, UserStore,
};
use tfy_types::Identity;

use crate::accounts::AccountService;
use crate::error::{BoardError, BoardResult};
use crate::likes::LikeEngine;
use crate::photos::PhotoService;
use crate::threads::ThreadManager;

/// Every board service wired to one set of stores.
#[derive(Clone)]
pub struct Board {
    pub accounts: AccountService,
    pub threads: ThreadManager,
    pub likes: LikeEngine,
    pub photos: PhotoService,
    auth: TokenAuthenticator,
}

impl Board {
    pub fn new(
        users: Arc<dyn UserStore>,
        threads: Arc<dyn ThreadStore>,
        photos: Arc<dyn PhotoStore>,
        auth_config: &AuthConfig,
        max_photo_bytes: usize,
    ) -> BoardResult<Self> {
        auth_config.validate()?;
        if max_photo_bytes == 0 {
            return Err(BoardError::Config("max_photo_bytes must be positive".into()));
        }

        let auth = TokenAuthenticator::new(users.clone(), auth_config.token_generator()?);
        Ok(Self {
            accounts: AccountService::new(users.clone(), auth.clone(), auth_config.hasher()?),
            threads: ThreadManager::new(threads.clone()),
            likes: LikeEngine::new(threads),
            photos: PhotoService::new(users, photos, max_photo_bytes),
            auth,
        })
    }

    /// A board backed by fresh in-memory stores.
    pub fn in_memory(auth_config: &AuthConfig, max_photo_bytes: usize) -> BoardResult<Self> {
        Self::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryThreadStore::new()),
            Arc::new(InMemoryPhotoStore::new()),
            auth_config,
            max_photo_bytes,
        )
    }

    /// Resolve request credentials to the caller's identity.
    pub async fn authenticate(&self, credentials: &Credentials) -> BoardResult<Identity> {
        Ok(self.auth.authenticate(credentials).await?)
    }
}
