//! Data models for Streamz API payloads.
//!
//! This module contains the data structures exchanged with the backend:
//!
//! - `UserProfile`, `SubscriptionPlan`, `RegistrationRequest`: account types
//! - `Content`, `Episode`, `Genre`: catalog types
//! - `WatchHistoryEntry`, `ProgressUpdate`: viewing-history types
//! - `Paginated<T>`: the DRF page wrapper used by list endpoints

pub mod content;
pub mod user;

pub use content::{
    Content, ContentFilter, ContentType, Episode, Genre, Paginated, ProgressUpdate,
    WatchHistoryEntry,
};
pub use user::{RegistrationRequest, SubscriptionPlan, UserProfile};
