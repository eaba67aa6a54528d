//! Platform path resolution.
//!
//! Persistent files live under the platform's local data directory
//! (`~/.local/share/consolekit` on Linux, `%LOCALAPPDATA%\consolekit` on Windows).
//! Paths read from configuration may start with `~`.

use std::path::PathBuf;

const APP_DIR: &str = "consolekit";

/// File name of the default token store.
pub const TOKEN_FILE_NAME: &str = "token.json";

/// Returns the data directory, falling back to the system temp dir on platforms
/// without one.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Default location of the persisted token.
#[must_use]
pub fn default_token_file() -> PathBuf {
    get_data_dir().join(TOKEN_FILE_NAME)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, and all paths when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
