//! Host bridge with same-frame fallbacks.
//!
//! [`Host`] is the only way the rest of the crate talks to the user outside of the
//! grid itself. It forwards each call to the parent frame's [`HostBridge`] and,
//! when that frame is absent or unreachable, degrades to the [`LocalFrame`]
//! equivalent:
//!
//! | Call            | Fallback                           |
//! |-----------------|------------------------------------|
//! | `notify`        | native alert with the message      |
//! | `alert`         | native alert                       |
//! | `confirm`       | native confirm                     |
//! | `prompt`        | native prompt                      |
//! | `navigate_back` | session history back               |
//! | `open_tab`      | `window.open(url, "_blank")`       |
//! | `reload_tab`    | local reload                       |
//! | `close_tab`     | none, logged at warn level         |
//! | `close_modal`   | local modal removal                |
//!
//! [`ConsoleError::HostUnreachable`](crate::domain::ConsoleError::HostUnreachable)
//! never escapes from `Host`; any other bridge error is treated the same way since
//! the user still has to see something.

mod bridge;

pub use bridge::{HostBridge, LocalFrame, MessageKind, TabDescriptor};

use crate::domain::error::ConsoleError;
use std::fmt;
use std::sync::Arc;

/// Target used when a tab has to be opened without the shell.
pub const BLANK_TARGET: &str = "_blank";

/// Parent-frame UI primitives with local fallbacks.
#[derive(Clone)]
pub struct Host {
    bridge: Option<Arc<dyn HostBridge>>,
    local: Arc<dyn LocalFrame>,
}

impl Host {
    /// Creates a host for a page embedded in a shell.
    pub fn new(bridge: Arc<dyn HostBridge>, local: Arc<dyn LocalFrame>) -> Self {
        Self {
            bridge: Some(bridge),
            local,
        }
    }

    /// Creates a host for a top-level page with no parent frame.
    pub fn detached(local: Arc<dyn LocalFrame>) -> Self {
        Self { bridge: None, local }
    }

    /// True when a parent bridge was supplied.
    #[must_use]
    pub fn has_bridge(&self) -> bool {
        self.bridge.is_some()
    }

    pub fn notify(&self, message: &str, kind: MessageKind) {
        let _span = tracing::debug_span!("host_notify", %kind).entered();
        if let Err(e) = self.via_bridge(|b| b.notify(message, kind)) {
            fallback_logged("notify", &e);
            self.local.alert(message);
        }
    }

    pub fn success(&self, message: &str) {
        self.notify(message, MessageKind::Success);
    }

    pub fn info(&self, message: &str) {
        self.notify(message, MessageKind::Info);
    }

    pub fn warning(&self, message: &str) {
        self.notify(message, MessageKind::Warning);
    }

    pub fn error(&self, message: &str) {
        self.notify(message, MessageKind::Error);
    }

    pub fn alert(&self, message: &str, title: &str) {
        let _span = tracing::debug_span!("host_alert", title).entered();
        if let Err(e) = self.via_bridge(|b| b.alert(message, title)) {
            fallback_logged("alert", &e);
            self.local.alert(message);
        }
    }

    /// Asks the user to confirm. Resolves to `false` when declined.
    pub async fn confirm(&self, message: &str, title: &str) -> bool {
        if let Some(bridge) = &self.bridge {
            match bridge.confirm(message, title).await {
                Ok(answer) => return answer,
                Err(e) => fallback_logged("confirm", &e),
            }
        }
        self.local.confirm(message)
    }

    /// Asks the user for text. Resolves to `None` when dismissed.
    pub async fn prompt(&self, message: &str, title: &str) -> Option<String> {
        if let Some(bridge) = &self.bridge {
            match bridge.prompt(message, title).await {
                Ok(answer) => return answer,
                Err(e) => fallback_logged("prompt", &e),
            }
        }
        self.local.prompt(message)
    }

    pub fn navigate_back(&self) {
        if let Err(e) = self.via_bridge(|b| b.navigate_back()) {
            fallback_logged("navigate_back", &e);
            self.local.history_back();
        }
    }

    pub fn open_tab(&self, tab: &TabDescriptor) {
        if let Err(e) = self.via_bridge(|b| b.open_tab(tab)) {
            fallback_logged("open_tab", &e);
            self.local.open_window(&tab.url, BLANK_TARGET);
        }
    }

    pub fn reload_tab(&self) {
        if let Err(e) = self.via_bridge(|b| b.reload_tab()) {
            fallback_logged("reload_tab", &e);
            self.local.reload();
        }
    }

    pub fn close_tab(&self) {
        if let Err(e) = self.via_bridge(|b| b.close_tab()) {
            tracing::warn!(error = %e, "cannot close tab outside the shell");
        }
    }

    pub fn close_modal(&self) {
        if let Err(e) = self.via_bridge(|b| b.close_modal()) {
            fallback_logged("close_modal", &e);
            self.local.close_modal();
        }
    }

    fn via_bridge<F>(&self, call: F) -> Result<(), ConsoleError>
    where
        F: FnOnce(&dyn HostBridge) -> Result<(), ConsoleError>,
    {
        match &self.bridge {
            Some(bridge) => call(bridge.as_ref()),
            None => Err(ConsoleError::HostUnreachable("no parent frame".to_string())),
        }
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("bridge", &self.bridge.is_some())
            .finish_non_exhaustive()
    }
}

fn fallback_logged(call: &str, error: &ConsoleError) {
    match error {
        ConsoleError::HostUnreachable(_) => {
            tracing::debug!(call, error = %error, "parent frame unreachable, using local frame");
        }
        other => tracing::warn!(call, error = %other, "host bridge failed, using local frame"),
    }
}
