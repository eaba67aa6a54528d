//! Token store abstraction.
//!
//! The API client reads the authentication token from a [`TokenStore`] on every
//! request when the deployment uses header tokens. Login flows write it, logout
//! clears it. Implementations use interior mutability so a single store can be
//! shared between the client and whatever performs the login.

use crate::domain::error::Result;

pub trait TokenStore: Send + Sync {
    /// Returns the current token, if one was saved.
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}
