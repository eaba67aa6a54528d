//! Page overlays with explicit lifecycles.
//!
//! Overlays are the full-page layers a console view puts above its content: the
//! loading mask shown until the page has loaded, and the iframe modal used for
//! detail and edit pages. Each is owned by a manager value instead of living as a
//! global element. Managers never touch a UI runtime themselves; every operation
//! returns the [`OverlayEffect`]s the runtime must apply, in order.
//!
//! Delayed removal is a two-step handshake. A manager emits
//! [`OverlayEffect::RemoveAfter`] with a [`TimerTicket`]; the runtime waits and then
//! passes the ticket back to the manager's `timer_elapsed`, which only emits
//! [`OverlayEffect::Remove`] if nothing reopened the overlay in the meantime.
//!
//! # Modules
//!
//! - `loading`: [`LoadingOverlay`]
//! - `modal`: [`ModalLauncher`] and [`ModalSpec`]

mod loading;
mod modal;

pub use loading::{LoadingOverlay, LoadingPhase, LOADING_FADE, LOADING_TEXT};
pub use modal::{ClickTarget, ModalHandle, ModalLauncher, ModalSpec, MODAL_TRANSITION};

use std::fmt;
use std::time::Duration;

/// Identifies an overlay element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayId {
    Loading,
    Modal(u64),
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("global-loading-mask"),
            Self::Modal(n) => write!(f, "custom-modal-{n}"),
        }
    }
}

/// Ticket for a pending delayed removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerTicket(pub(crate) u64);

/// What an overlay layer contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layer {
    /// Opaque mask with a spinner and a caption.
    Loading { text: String },
    /// Dimmed backdrop with a framed page and a close button.
    Modal(ModalSpec),
}

/// A rendering instruction for the UI runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEffect {
    /// Insert the layer into the page.
    Mount { id: OverlayId, layer: Layer },
    /// Animate the layer in or out over `duration`.
    Transition {
        id: OverlayId,
        visible: bool,
        duration: Duration,
    },
    /// Start a timer and report `ticket` back when it fires.
    RemoveAfter {
        id: OverlayId,
        ticket: TimerTicket,
        after: Duration,
    },
    /// Remove the layer now.
    Remove { id: OverlayId },
}
