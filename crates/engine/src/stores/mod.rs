//! In-memory state storage.
//!
//! Sessions are never persisted; a restart ends every game in progress.

pub mod session;

pub use session::{SessionHandle, SessionStore, StoreError};
