//! Authentication module for managing the user session and its credential.
//!
//! This module provides:
//! - `SessionManager`: login, registration, logout, and startup recovery
//! - `CredentialStore`: the persistent token slot (OS keychain or file)
//!
//! The session manager is the single writer of the credential slot and the
//! API client's token; everything else only reads the session.

pub mod session;
pub mod store;

pub use session::{SessionManager, SessionState};
pub use store::CredentialStore;
