use std::sync::Arc;

use async_trait::async_trait;
use tfy_crypto::TokenGenerator;
use tfy_store::UserStore;
use tfy_types::{Identity, SessionToken, UserId};

use crate::error::AuthError;

/// What a request presented to prove who it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(SessionToken),
    Anonymous,
}

impl Credentials {
    /// Parse an `Authorization` header value.
    ///
    /// An absent header is [`Credentials::Anonymous`]. A header that is
    /// present but not `Bearer <token>` is rejected outright.
    pub fn from_header(header: Option<&str>) -> Result<Self, AuthError> {
        let Some(value) = header else {
            return Ok(Self::Anonymous);
        };
        let (scheme, token) = value.trim().split_once(' ').ok_or(AuthError::InvalidToken)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::InvalidToken);
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(Self::Bearer(SessionToken::new(token)))
    }
}

/// Resolves credentials to the caller's identity.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve `credentials`. Anonymous callers are rejected.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError>;
}

/// Bearer-token authentication against the account store.
///
/// An account holds at most one token; issuing a new one invalidates the
/// previous session and revoking clears it.
#[derive(Clone)]
pub struct TokenAuthenticator {
    users: Arc<dyn UserStore>,
    tokens: TokenGenerator,
}

impl TokenAuthenticator {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenGenerator) -> Self {
        Self { users, tokens }
    }

    /// Mint a fresh token and make it the account's only valid one.
    pub async fn issue_token(&self, user: &UserId) -> Result<SessionToken, AuthError> {
        let token = self.tokens.generate();
        self.users.set_token(user, Some(token.clone())).await?;
        tracing::debug!(user = %user.short_id(), "session token issued");
        Ok(token)
    }

    /// Clear the account's token so it no longer resolves.
    pub async fn revoke_token(&self, user: &UserId) -> Result<(), AuthError> {
        self.users.set_token(user, None).await?;
        tracing::debug!(user = %user.short_id(), "session token revoked");
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for TokenAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let Credentials::Bearer(token) = credentials else {
            return Err(AuthError::InvalidToken);
        };
        match self.users.find_by_token(token).await? {
            Some(user) => Ok(user.identity()),
            None => Err(AuthError::InvalidToken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfy_store::InMemoryUserStore;
    use tfy_types::User;

    async fn setup() -> (TokenAuthenticator, User) {
        let (auth, _, alice) = setup_with_store().await;
        (auth, alice)
    }

    async fn setup_with_store() -> (TokenAuthenticator, Arc<InMemoryUserStore>, User) {
        let users = Arc::new(InMemoryUserStore::new());
        let alice = User::new("a@x.com", Some("alice".into()), "hash".into());
        users.insert(alice.clone()).await.unwrap();
        let auth = TokenAuthenticator::new(users.clone(), TokenGenerator::default());
        (auth, users, alice)
    }

    #[test]
    fn parses_bearer_header() {
        let creds = Credentials::from_header(Some("Bearer abc123")).unwrap();
        assert_eq!(creds, Credentials::Bearer(SessionToken::new("abc123")));
        let creds = Credentials::from_header(Some("bearer  abc123 ")).unwrap();
        assert_eq!(creds, Credentials::Bearer(SessionToken::new("abc123")));
        assert_eq!(Credentials::from_header(None).unwrap(), Credentials::Anonymous);
    }

    #[test]
    fn rejects_malformed_header() {
        for header in ["Basic abc", "Bearer", "Bearer   ", "abc123", ""] {
            assert_eq!(
                Credentials::from_header(Some(header)).unwrap_err(),
                AuthError::InvalidToken,
                "header {header:?}"
            );
        }
    }

    #[tokio::test]
    async fn issued_token_resolves_to_owner() {
        let (auth, alice) = setup().await;
        let token = auth.issue_token(&alice.id).await.unwrap();
        assert_eq!(token.as_str().len(), 32);

        let identity = auth.authenticate(&Credentials::Bearer(token)).await.unwrap();
        assert_eq!(identity.id, alice.id);
        assert_eq!(identity.username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn reissue_invalidates_previous() {
        let (auth, alice) = setup().await;
        let first = auth.issue_token(&alice.id).await.unwrap();
        let second = auth.issue_token(&alice.id).await.unwrap();
        assert_ne!(first, second);

        let err = auth.authenticate(&Credentials::Bearer(first)).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
        assert!(auth.authenticate(&Credentials::Bearer(second)).await.is_ok());
    }

    #[tokio::test]
    async fn revoked_token_stops_resolving() {
        let (auth, alice) = setup().await;
        let token = auth.issue_token(&alice.id).await.unwrap();
        auth.revoke_token(&alice.id).await.unwrap();
        let err = auth.authenticate(&Credentials::Bearer(token)).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn anonymous_and_unknown_rejected() {
        let (auth, _) = setup().await;
        assert!(auth.authenticate(&Credentials::Anonymous).await.is_err());
        let unknown = Credentials::Bearer(SessionToken::new("nope"));
        assert_eq!(auth.authenticate(&unknown).await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_issue_leaves_one_session() {
        let (auth, users, alice) = setup_with_store().await;

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let auth = auth.clone();
                let id = alice.id;
                tokio::spawn(async move { auth.issue_token(&id).await })
            })
            .collect();
        let mut issued = Vec::new();
        for handle in handles {
            issued.push(handle.await.unwrap().unwrap());
        }

        let mut live = 0;
        for token in issued {
            if auth.authenticate(&Credentials::Bearer(token)).await.is_ok() {
                live += 1;
            }
        }
        assert_eq!(live, 1);
        assert_eq!(users.sessions_for(&alice.id).unwrap(), 1);
    }
}
