//! In-memory token store for tests and short-lived tools.

use crate::domain::error::{ConsoleError, Result};
use crate::storage::backend::TokenStore;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|e| ConsoleError::Storage(format!("token lock poisoned: {e}")))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}
