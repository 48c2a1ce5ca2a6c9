//! Foundation types for Threadify.
//!
//! This crate provides the identifiers, account records and the thread
//! aggregate used throughout the workspace. Every other Threadify crate
//! depends on `tfy-types`.
//!
//! # Key Types
//!
//! - [`UserId`], [`ThreadId`], [`CommentId`], [`LikeId`] -- UUID v7 identifiers
//! - [`User`] / [`PublicUser`] -- stored account and its wire view
//! - [`Identity`] -- the authenticated caller, passed explicitly
//! - [`SessionToken`] -- opaque bearer token
//! - [`Thread`] -- aggregate root owning its [`Comment`]s and [`Like`]s
//! - [`PhotoRef`] -- content-addressed profile photo reference

pub mod error;
pub mod ids;
pub mod photo;
pub mod thread;
pub mod user;

pub use error::TypeError;
pub use ids::{CommentId, LikeId, ThreadId, UserId};
pub use photo::{Photo, PhotoMeta, PhotoRef};
pub use thread::{Comment, Like, LikeToggle, Thread, ThreadPatch};
pub use user::{Identity, PublicUser, SessionToken, User};
