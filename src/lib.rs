//! Client library for the Streamz streaming-catalog API.
//!
//! The core of the crate is the session lifecycle: a persistent credential
//! slot ([`auth::CredentialStore`]), a shared HTTP client that attaches the
//! current token to every request ([`api::ApiClient`]), and the
//! [`auth::SessionManager`] that orchestrates login, registration, logout,
//! and startup session recovery. Catalog and viewing-history fetches ride on
//! the same client once a session is established.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError, AuthRejection};
pub use auth::{CredentialStore, SessionManager, SessionState};
pub use config::Config;
