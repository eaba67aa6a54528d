//! consolekit: presentation plumbing for administrative web consoles.
//!
//! consolekit provides the parts of an admin console page that are not specific to
//! any one screen:
//! - A data-grid controller owning pagination, filters, sort and row selection
//! - An API client that attaches the auth token and classifies every response
//! - A host bridge reaching the parent shell's toasts, dialogs and tabs, with
//!   same-frame fallbacks
//! - Loading-mask and iframe-modal overlays with explicit lifecycles

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Grid state machine
//! │  - Event handling                                   │
//! │  - Change notifications                             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Net Layer     │   │ Host Layer    │
//! │ (ui/)         │   │ (net/)        │   │ (host/)       │
//! │ - View models │   │ - Transport   │   │ - Bridge      │
//! │ - Text render │   │ - Classify    │   │ - Fallbacks   │
//! │               │   │ - Tokens      │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Storage, Overlay & Infrastructure          │
//! │  - Columns, pages, envelopes, errors (domain/)      │
//! │  - Token persistence (storage/)                     │
//! │  - Loading mask and modal lifecycles (overlay/)     │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Grid controller with event/notification model
//! - [`domain`]: Columns, pagination, envelopes and errors
//! - [`net`]: Transport, response classification and the API client
//! - [`host`]: Parent-frame bridge and local fallbacks
//! - [`overlay`]: Loading mask and modal launcher
//! - [`storage`]: Token persistence
//! - [`ui`]: View models and text rendering
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! ```toml
//! base_url = "https://admin.example.com"
//! api_prefix = "/api"
//! timeout_ms = 15000
//! token_origin = "header"
//! token_file = "~/.local/share/consolekit/token.json"
//! trace_level = "debug"
//! log_file = "~/.local/share/consolekit/consolekit.log"
//! ```
//!
//! # Example
//!
//! ```rust
//! use consolekit::app::DataGridController;
//! use consolekit::domain::{ColumnDescriptor, ColumnSet, FilterState};
//!
//! let columns = ColumnSet::new(vec![
//!     ColumnDescriptor::text("username", "User"),
//!     ColumnDescriptor::text("email", "Email"),
//! ])?;
//! let mut grid = DataGridController::new(columns, None, FilterState::new());
//!
//! let notifications = grid.set_page_size(30)?;
//! assert!(notifications.iter().all(|n| n.requires_reload()));
//! assert_eq!(grid.query().page, 1);
//! # Ok::<(), consolekit::ConsoleError>(())
//! ```

pub mod app;
pub mod domain;
pub mod host;
pub mod infrastructure;
pub mod net;
pub mod overlay;
pub mod storage;
pub mod ui;

pub mod observability;

pub use app::{handle_event, DataGridController, GridEvent, GridNotification, GridState};
pub use domain::{ConsoleError, Result};
pub use host::{Host, HostBridge, LocalFrame, MessageKind};
pub use net::{ApiClient, RequestOptions, TokenOrigin};

use crate::infrastructure::paths::{default_token_file, expand_tilde};
use crate::net::{ReqwestTransport, DEFAULT_API_PREFIX, DEFAULT_TIMEOUT_MS};
use crate::storage::JsonTokenStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Deployment configuration.
///
/// Loaded from a TOML file by the binary, or from a flat string map when embedded
/// in a host that only passes key/value pairs. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scheme and authority of the console server. Default: `http://127.0.0.1:8000`
    pub base_url: String,

    /// Path prefix of the API. Default: `/api`
    pub api_prefix: String,

    /// Request timeout in milliseconds. Default: `15000`
    pub timeout_ms: u64,

    /// Where the server expects the auth token. Default: `cookie`
    pub token_origin: TokenOrigin,

    /// Token store location for header-origin deployments.
    ///
    /// Default: `token.json` in the data directory.
    pub token_file: Option<PathBuf>,

    /// Tracing level. Options: `trace`, `debug`, `info`, `warn`, `error`.
    pub trace_level: Option<String>,

    /// Log file. Logs go to stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            token_origin: TokenOrigin::Cookie,
            token_file: None,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a flat key/value map.
    ///
    /// Parsing is lenient: unparsable values fall back to their defaults and
    /// unknown keys are ignored. Run [`validate`](Self::validate) afterwards.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use consolekit::{Config, TokenOrigin};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "https://admin.example.com".to_string());
    /// map.insert("timeout_ms".to_string(), "soon".to_string());
    /// map.insert("token_origin".to_string(), "header".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.base_url, "https://admin.example.com");
    /// assert_eq!(config.timeout_ms, 15000);
    /// assert_eq!(config.token_origin, TokenOrigin::Header);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let token_origin = non_empty("token_origin")
            .and_then(|s| {
                s.parse::<TokenOrigin>()
                    .map_err(|e| tracing::debug!(error = %e, "ignoring token_origin"))
                    .ok()
            })
            .unwrap_or(defaults.token_origin);

        Self {
            base_url: non_empty("base_url").map_or(defaults.base_url, String::from),
            api_prefix: config
                .get("api_prefix")
                .map_or(defaults.api_prefix, |s| s.trim().to_string()),
            timeout_ms: non_empty("timeout_ms")
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(defaults.timeout_ms),
            token_origin,
            token_file: non_empty("token_file").map(expand_tilde),
            trace_level: non_empty("trace_level").map(String::from),
            log_file: non_empty("log_file").map(expand_tilde),
        }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] for malformed TOML or mistyped values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(text).map_err(|e| ConsoleError::Config(format!("invalid config: {e}")))?;
        config.token_file = config.token_file.map(|p| expand_tilde(&p.to_string_lossy()));
        config.log_file = config.log_file.map(|p| expand_tilde(&p.to_string_lossy()));
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the file cannot be read and
    /// [`ConsoleError::Config`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = ?path, "loading config");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks values that cannot be defaulted away.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConsoleError::Config(format!(
                "base_url must start with http:// or https://, got '{url}'"
            )));
        }
        let authority = url.split_once("://").map_or("", |(_, rest)| rest.trim_matches('/'));
        if authority.is_empty() {
            return Err(ConsoleError::Config("base_url has no host".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ConsoleError::Config("timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Token store location, defaulted to the data directory.
    #[must_use]
    pub fn token_file_path(&self) -> PathBuf {
        self.token_file.clone().unwrap_or_else(default_token_file)
    }
}

/// Builds an API client for a deployment.
///
/// Validates the configuration, creates the `reqwest` transport and, for
/// header-origin deployments, opens the JSON token store.
///
/// # Errors
///
/// Returns [`ConsoleError::Config`] for invalid configuration and any error from
/// opening the token store.
pub fn initialize(config: &Config, host: Host) -> Result<ApiClient> {
    tracing::debug!(
        base_url = %config.base_url,
        token_origin = %config.token_origin,
        "initializing consolekit"
    );
    config.validate()?;

    let transport = ReqwestTransport::new(&config.base_url, &config.api_prefix, config.timeout())?;
    let mut builder = ApiClient::builder()
        .transport(Arc::new(transport))
        .host(host)
        .token_origin(config.token_origin);

    if config.token_origin == TokenOrigin::Header {
        let store = JsonTokenStore::new(config.token_file_path())?;
        builder = builder.token_store(Arc::new(store));
    }

    builder.build()
}
