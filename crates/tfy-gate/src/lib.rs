//! Authentication and ownership enforcement for Threadify.
//!
//! Every protected request passes through two checks:
//!
//! 1. **Authentication** -- the bearer token is resolved to an [`Identity`]
//!    by an [`AuthProvider`]. Unknown, revoked or malformed tokens fail with
//!    [`AuthError::InvalidToken`].
//! 2. **Ownership** -- before a thread or comment is changed,
//!    [`require_ownership`] compares its recorded owner with the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use tfy_gate::require_ownership;
//! use tfy_types::{Identity, Thread, UserId};
//!
//! let alice = Identity { id: UserId::new(), email: "a@x.com".into(), username: None };
//! let thread = Thread::new(&alice, "hello");
//! assert!(require_ownership(&thread, &alice).is_ok());
//! ```
//!
//! [`Identity`]: tfy_types::Identity

pub mod authenticator;
pub mod config;
pub mod error;
pub mod ownership;

pub use authenticator::{AuthProvider, Credentials, TokenAuthenticator};
pub use config::AuthConfig;
pub use error::AuthError;
pub use ownership::{require_ownership, Owned};
