//! Parent-frame bridge abstraction.
//!
//! A console page usually runs inside an iframe of a tabbed admin shell. The shell
//! owns the toast stack, the dialog boxes and the tab strip; the page reaches them
//! through a [`HostBridge`]. Nothing is shared in memory across that boundary, so
//! every call can fail with [`ConsoleError::HostUnreachable`] and
//! [`Host`](crate::host::Host) decides what to do about it.
//!
//! [`ConsoleError::HostUnreachable`]: crate::domain::ConsoleError::HostUnreachable

use crate::domain::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a transient toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// A tab the shell should open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDescriptor {
    pub url: String,
    pub title: String,
}

impl TabDescriptor {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// UI primitives owned by the parent frame.
///
/// Implementations return [`ConsoleError::HostUnreachable`] when the parent frame
/// does not exist or does not expose the primitive. A user declining a confirm box
/// is not an error: `confirm` resolves to `false` and `prompt` to `None`.
///
/// [`ConsoleError::HostUnreachable`]: crate::domain::ConsoleError::HostUnreachable
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Shows a transient toast.
    fn notify(&self, message: &str, kind: MessageKind) -> Result<()>;

    /// Shows a blocking alert dialog.
    fn alert(&self, message: &str, title: &str) -> Result<()>;

    /// Asks a yes/no question.
    async fn confirm(&self, message: &str, title: &str) -> Result<bool>;

    /// Asks for a line of text.
    async fn prompt(&self, message: &str, title: &str) -> Result<Option<String>>;

    fn navigate_back(&self) -> Result<()>;

    fn open_tab(&self, tab: &TabDescriptor) -> Result<()>;

    /// Closes the modal the calling page is displayed in.
    fn close_modal(&self) -> Result<()>;

    fn reload_tab(&self) -> Result<()>;

    fn close_tab(&self) -> Result<()>;
}

/// Same-frame equivalents used when the parent frame cannot be reached.
///
/// These mirror what a bare browser window offers: native dialogs, session history
/// and `window.open`. Calls cannot fail.
pub trait LocalFrame: Send + Sync {
    fn alert(&self, message: &str);

    fn confirm(&self, message: &str) -> bool;

    fn prompt(&self, message: &str) -> Option<String>;

    fn history_back(&self);

    /// Opens `url` in a new browsing context named `target`.
    fn open_window(&self, url: &str, target: &str);

    fn reload(&self);

    /// Removes the modal this frame is showing, if any.
    fn close_modal(&self);
}
