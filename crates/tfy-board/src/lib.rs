//! Core board logic for Threadify.
//!
//! This crate is where requests become state changes. It provides:
//! - [`AccountService`] -- sign-up, sign-in, password change, sign-out
//! - [`ThreadManager`] -- thread lifecycle and embedded comments
//! - [`LikeEngine`] -- the per-user like toggle
//! - [`PhotoService`] -- one profile photo per account
//! - [`Board`] -- all of the above wired to a single set of stores
//!
//! Every operation takes the caller's [`Identity`](tfy_types::Identity)
//! explicitly. Mutations on threads and comments confirm existence first and
//! ownership second.

pub mod accounts;
pub mod board;
pub mod error;
pub mod likes;
pub mod photos;
pub mod requests;
pub mod threads;

pub use accounts::AccountService;
pub use board::Board;
pub use error::{BoardError, BoardResult};
pub use likes::LikeEngine;
pub use photos::{PhotoService, DEFAULT_MAX_PHOTO_BYTES};
pub use requests::{ChangePassword, NewComment, NewThread, PhotoUpload, SignIn, SignUp};
pub use threads::ThreadManager;
