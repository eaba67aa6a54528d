//! Persistent token storage.
//!
//! Header-token deployments keep the login token between runs. The API client only
//! ever sees the [`TokenStore`] trait.
//!
//! # Modules
//!
//! - `backend`: [`TokenStore`] trait
//! - `json`: atomic JSON file store
//! - `memory`: process-local store
//! - `models`: on-disk record types

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::TokenStore;
pub use json::JsonTokenStore;
pub use memory::MemoryTokenStore;
pub use models::TokenRecord;
