//! API module for communicating with the Streamz backend.
//!
//! This module provides:
//! - `ApiClient`: the shared authenticated HTTP client
//! - `ApiError`: status-code error taxonomy for data endpoints
//! - `AuthRejection`: normalized login/registration failures

pub mod client;
pub mod error;

pub use client::{ApiClient, AuthPayload};
pub use error::{ApiError, AuthRejection};
