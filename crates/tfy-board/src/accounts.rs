use std::sync::Arc;

use tfy_crypto::{CryptoResult, PasswordHasher};
use tfy_gate::TokenAuthenticator;
use tfy_store::{StoreError, UserStore};
use tfy_types::{Identity, PublicUser, User};

use crate::error::{BoardError, BoardResult};
use crate::requests::{ChangePassword, SignIn, SignUp};

/// Run a bcrypt call on the blocking pool.
async fn blocking<T, F>(work: F) -> BoardResult<T>
where
    F: FnOnce() -> CryptoResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| BoardError::Internal(format!("hashing task failed: {e}")))?
        .map_err(BoardError::from)
}

/// Sign-up, sign-in, password change and sign-out.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    auth: TokenAuthenticator,
    hasher: PasswordHasher,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, auth: TokenAuthenticator, hasher: PasswordHasher) -> Self {
        Self {
            users,
            auth,
            hasher,
        }
    }

    /// Register a new account. The plaintext password is hashed and dropped.
    pub async fn sign_up(&self, request: SignUp) -> BoardResult<PublicUser> {
        request.validate()?;
        let hasher = self.hasher;
        let password = request.password;
        let hashed = blocking(move || hasher.hash(&password)).await?;

        let username = request.username.filter(|name| !name.trim().is_empty());
        let user = User::new(request.email.trim(), username, hashed);
        let public = user.public();
        match self.users.insert(user).await {
            Ok(()) => {}
            Err(StoreError::DuplicateEmail(_)) => {
                return Err(BoardError::BadRequest("email is already registered".into()));
            }
            Err(e) => return Err(e.into()),
        }
        tracing::info!(user = %public.id.short_id(), "account created");
        Ok(public)
    }

    /// Check credentials and start a new session, replacing any previous one.
    pub async fn sign_in(&self, request: SignIn) -> BoardResult<PublicUser> {
        let Some(mut user) = self.users.find_by_email(request.email.trim()).await? else {
            tracing::debug!("sign-in for unknown email");
            return Err(BoardError::InvalidCredentials);
        };

        if !self.verify(request.password, user.hashed_password.clone()).await? {
            tracing::debug!(user = %user.id.short_id(), "sign-in with wrong password");
            return Err(BoardError::InvalidCredentials);
        }

        let token = self.auth.issue_token(&user.id).await?;
        user.token = Some(token);
        tracing::info!(user = %user.id.short_id(), "signed in");
        Ok(user.public_with_token())
    }

    /// Replace the caller's password after checking the current one.
    pub async fn change_password(&self, caller: &Identity, request: ChangePassword) -> BoardResult<()> {
        let user = self
            .users
            .find_by_id(&caller.id)
            .await?
            .ok_or(BoardError::InvalidToken)?;

        if request.new.is_empty() {
            return Err(BoardError::InvalidCredentials);
        }
        if !self.verify(request.old, user.hashed_password).await? {
            return Err(BoardError::InvalidCredentials);
        }

        let hasher = self.hasher;
        let new = request.new;
        let hashed = blocking(move || hasher.hash(&new)).await?;
        self.users.set_password_hash(&caller.id, hashed).await?;
        tracing::info!(user = %caller.id.short_id(), "password changed");
        Ok(())
    }

    /// End the caller's session. Safe to call repeatedly.
    pub async fn sign_out(&self, caller: &Identity) -> BoardResult<()> {
        self.auth.revoke_token(&caller.id).await?;
        tracing::info!(user = %caller.id.short_id(), "signed out");
        Ok(())
    }

    async fn verify(&self, plaintext: String, digest: String) -> BoardResult<bool> {
        let hasher = self.hasher;
        blocking(move || hasher.verify(&plaintext, &digest)).await
    }
}
