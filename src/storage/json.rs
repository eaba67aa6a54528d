//! JSON file-based token store.
//!
//! Stores the token in a small human-readable JSON document. Writes go to a
//! temporary file that is then renamed over the real one, so a crash mid-write
//! leaves either the old token or the new one on disk, never a torn file.
//!
//! Reads go back to the file every time, so a token saved by another process
//! (say `consolekit login` in a second shell) is seen without reopening the store.
//!
//! ```json
//! {
//!   "version": 1,
//!   "token": { "token": "abc123", "saved_at": "2024-05-01T08:00:00Z" }
//! }
//! ```

use crate::domain::error::{ConsoleError, Result};
use crate::storage::backend::TokenStore;
use crate::storage::models::TokenRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    version: u32,

    #[serde(default)]
    token: Option<TokenRecord>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            token: None,
        }
    }
}

pub struct JsonTokenStore {
    file_path: PathBuf,

    data: Mutex<StoreData>,
}

impl JsonTokenStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file is an empty store; it is only created on the first save.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the directory cannot be created or the file
    /// cannot be read, and [`ConsoleError::Storage`] if it is not valid JSON.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing token store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no token file yet");
            StoreData::default()
        };

        Ok(Self {
            file_path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// When the current token was saved.
    pub fn saved_at(&self) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        let mut data = self.lock()?;
        self.refresh(&mut data)?;
        Ok(data.token.as_ref().map(|r| r.saved_at))
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| ConsoleError::Storage(format!("failed to parse token file: {e}")))?;

        tracing::debug!(
            version = data.version,
            has_token = data.token.is_some(),
            "loaded token file"
        );

        Ok(data)
    }

    fn save_to_file(&self, data: &StoreData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| ConsoleError::Storage(format!("failed to serialize token file: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "token file saved");
        Ok(())
    }

    /// Replaces the cached data with what is on disk now.
    fn refresh(&self, data: &mut StoreData) -> Result<()> {
        *data = if self.file_path.exists() {
            Self::load_from_file(&self.file_path)?
        } else {
            StoreData::default()
        };
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreData>> {
        self.data
            .lock()
            .map_err(|e| ConsoleError::Storage(format!("token lock poisoned: {e}")))
    }
}

impl TokenStore for JsonTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let mut data = self.lock()?;
        self.refresh(&mut data)?;
        Ok(data.token.as_ref().map(|r| r.token.clone()))
    }

    fn save(&self, token: &str) -> Result<()> {
        let _span = tracing::debug_span!("token_save").entered();

        let mut data = self.lock()?;
        data.token = Some(TokenRecord::new(token));
        self.save_to_file(&data)
    }

    fn clear(&self) -> Result<()> {
        let _span = tracing::debug_span!("token_clear").entered();

        let mut data = self.lock()?;
        self.refresh(&mut data)?;
        if data.token.take().is_none() {
            tracing::trace!("skipping save, no token");
            return Ok(());
        }
        self.save_to_file(&data)
    }
}

impl std::fmt::Debug for JsonTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonTokenStore")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}
