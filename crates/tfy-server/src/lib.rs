//! HTTP/JSON API server for Threadify.
//!
//! Exposes account, thread, comment, like and profile-photo routes over
//! axum. Protected routes resolve the `Authorization: Bearer` token through
//! the [`Caller`] extractor; board errors map to status codes in
//! [`ApiError`].

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::Caller;
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use extract::{Body, Payload};
pub use router::build_router;
pub use server::ThreadifyServer;
pub use state::AppState;
