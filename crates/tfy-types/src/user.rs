use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::photo::PhotoRef;

/// Opaque bearer token identifying a single active session.
///
/// Tokens are compared by exact equality only; no format is assumed beyond
/// what the generator produces. The `Debug` output is redacted so tokens do
/// not end up in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token value received from a client or a generator.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Hex-encode raw random bytes into a token.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(<redacted>)")
    }
}

/// A stored user account.
///
/// Not serializable on purpose: the API exposes [`PublicUser`] instead, which
/// never carries the password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: Option<String>,
    pub hashed_password: String,
    pub token: Option<SessionToken>,
    pub profile_photo: Option<PhotoRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account record with no active session.
    pub fn new(email: impl Into<String>, username: Option<String>, hashed_password: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email: email.into(),
            username,
            hashed_password,
            token: None,
            profile_photo: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The identity this user acts as once authenticated.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
        }
    }

    /// Public view without the current token.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            profile_photo: self.profile_photo,
            token: None,
            created_at: self.created_at,
        }
    }

    /// Public view including the current token (sign-in responses only).
    pub fn public_with_token(&self) -> PublicUser {
        PublicUser {
            token: self.token.clone(),
            ..self.public()
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("has_session", &self.token.is_some())
            .field("profile_photo", &self.profile_photo)
            .finish()
    }
}

/// What a user looks like on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub username: Option<String>,
    pub profile_photo: Option<PhotoRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<SessionToken>,
    pub created_at: DateTime<Utc>,
}

/// The authenticated caller, resolved once per request from a bearer token
/// and passed explicitly to every operation that needs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let mut user = User::new("a@x.com", Some("alice".into()), "$2b$10$hash".into());
        user.token = Some(SessionToken::new("deadbeef"));
        user
    }

    #[test]
    fn public_view_hides_token_by_default() {
        let json = serde_json::to_value(sample_user().public()).unwrap();
        assert!(json.get("token").is_none());
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn sign_in_view_carries_token() {
        let json = serde_json::to_value(sample_user().public_with_token()).unwrap();
        assert_eq!(json["token"], "deadbeef");
    }

    #[test]
    fn debug_never_prints_secrets() {
        let debug = format!("{:?}", sample_user());
        assert!(!debug.contains("deadbeef"));
        assert!(!debug.contains("$2b$10$hash"));
        assert_eq!(format!("{:?}", SessionToken::new("abc")), "SessionToken(<redacted>)");
    }

    #[test]
    fn token_from_bytes_is_hex() {
        let token = SessionToken::from_bytes(&[0x00, 0xff, 0x10]);
        assert_eq!(token.as_str(), "00ff10");
    }

    #[test]
    fn identity_copies_display_fields() {
        let user = sample_user();
        let identity = user.identity();
        assert_eq!(identity.id, user.id);
        assert_eq!(identity.username.as_deref(), Some("alice"));
    }
}
