//! Document storage for Threadify.
//!
//! Three collections back the service: accounts, threads (with their
//! embedded comments and likes) and profile photos. Each is described by an
//! async trait so the service layer never depends on a concrete backend.
//!
//! # Storage Backends
//!
//! - [`InMemoryUserStore`], [`InMemoryThreadStore`], [`InMemoryPhotoStore`]
//!   -- lock-guarded maps for tests, local runs and embedding
//!
//! # Design Rules
//!
//! 1. Every mutation is one atomic store operation. There is no
//!    read-modify-write of whole documents across calls.
//! 2. A missing thread is an `Ok(None)`/`Ok(false)` outcome, not an error.
//! 3. Index maintenance (email, token) happens in the same step as the
//!    record change it follows.
//! 4. Lock poisoning surfaces as [`StoreError::LockPoisoned`], never a panic.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryPhotoStore, InMemoryThreadStore, InMemoryUserStore};
pub use traits::{PhotoStore, ThreadStore, UserStore};
