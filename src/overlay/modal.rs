//! Iframe modal launcher.
//!
//! At most one modal exists at a time. Opening a new one removes the current one
//! outright. Closing through a handle or a backdrop click plays a
//! [`MODAL_TRANSITION`] exit animation before removal; [`ModalLauncher::close_current`]
//! is what the embedded page calls through its parent and removes without one.

use crate::overlay::{Layer, OverlayEffect, OverlayId, TimerTicket};
use std::time::Duration;

/// Length of the open and close animations.
pub const MODAL_TRANSITION: Duration = Duration::from_millis(300);

/// What to show in a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSpec {
    pub url: String,
    /// CSS dimension, `80vw` by default.
    pub width: String,
    /// CSS dimension, `80vh` by default.
    pub height: String,
    /// Header bar background, `#fff` by default.
    pub header_bg: String,
}

impl ModalSpec {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: "80vw".to_string(),
            height: "80vh".to_string(),
            header_bg: "#fff".to_string(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    #[must_use]
    pub fn with_header_bg(mut self, color: impl Into<String>) -> Self {
        self.header_bg = color.into();
        self
    }
}

/// Refers to one opened modal. Handles of replaced modals are inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalHandle(u64);

impl ModalHandle {
    pub const fn id(self) -> OverlayId {
        OverlayId::Modal(self.0)
    }
}

/// Where a click inside the modal layer landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Open,
    Closing(TimerTicket),
}

#[derive(Debug, Default)]
pub struct ModalLauncher {
    current: Option<(ModalHandle, Phase)>,
    next_id: u64,
    next_ticket: u64,
}

impl ModalLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed modal, including one that is animating out.
    pub fn current(&self) -> Option<ModalHandle> {
        self.current.map(|(handle, _)| handle)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.current, Some((_, Phase::Open)))
    }

    /// Opens a modal, replacing any existing one.
    ///
    /// Returns no handle and no effects when the url is empty.
    pub fn open(&mut self, spec: ModalSpec) -> (Option<ModalHandle>, Vec<OverlayEffect>) {
        if spec.url.trim().is_empty() {
            tracing::debug!("modal url empty, nothing to open");
            return (None, Vec::new());
        }

        let mut effects = Vec::with_capacity(3);
        if let Some((old, _)) = self.current.take() {
            effects.push(OverlayEffect::Remove { id: old.id() });
        }

        self.next_id += 1;
        let handle = ModalHandle(self.next_id);
        tracing::debug!(url = %spec.url, id = %handle.id(), "opening modal");

        effects.push(OverlayEffect::Mount {
            id: handle.id(),
            layer: Layer::Modal(spec),
        });
        effects.push(OverlayEffect::Transition {
            id: handle.id(),
            visible: true,
            duration: MODAL_TRANSITION,
        });

        self.current = Some((handle, Phase::Open));
        (Some(handle), effects)
    }

    /// Animates the modal out and schedules its removal.
    pub fn close(&mut self, handle: ModalHandle) -> Vec<OverlayEffect> {
        let Some((current, Phase::Open)) = self.current else {
            return Vec::new();
        };
        if current != handle {
            tracing::trace!(id = %handle.id(), "close on replaced modal");
            return Vec::new();
        }

        let ticket = TimerTicket(self.next_ticket);
        self.next_ticket += 1;
        self.current = Some((handle, Phase::Closing(ticket)));

        vec![
            OverlayEffect::Transition {
                id: handle.id(),
                visible: false,
                duration: MODAL_TRANSITION,
            },
            OverlayEffect::RemoveAfter {
                id: handle.id(),
                ticket,
                after: MODAL_TRANSITION,
            },
        ]
    }

    /// Handles a click on the modal layer. Only backdrop clicks close.
    pub fn click(&mut self, handle: ModalHandle, target: ClickTarget) -> Vec<OverlayEffect> {
        match target {
            ClickTarget::Backdrop => self.close(handle),
            ClickTarget::Content => Vec::new(),
        }
    }

    /// Removes the current modal immediately.
    pub fn close_current(&mut self) -> Vec<OverlayEffect> {
        match self.current.take() {
            Some((handle, _)) => vec![OverlayEffect::Remove { id: handle.id() }],
            None => Vec::new(),
        }
    }

    pub fn timer_elapsed(&mut self, ticket: TimerTicket) -> Vec<OverlayEffect> {
        match self.current {
            Some((handle, Phase::Closing(pending))) if pending == ticket => {
                self.current = None;
                vec![OverlayEffect::Remove { id: handle.id() }]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_opens_nothing() {
        let mut modals = ModalLauncher::new();
        let (handle, effects) = modals.open(ModalSpec::new("  "));
        assert!(handle.is_none());
        assert!(effects.is_empty());
        assert!(modals.current().is_none());
    }

    #[test]
    fn defaults_match_console_layout() {
        let spec = ModalSpec::new("/admin/user/1/change/");
        assert_eq!(spec.width, "80vw");
        assert_eq!(spec.height, "80vh");
        assert_eq!(spec.header_bg, "#fff");
    }

    #[test]
    fn opening_replaces_current_modal() {
        let mut modals = ModalLauncher::new();
        let (first, _) = modals.open(ModalSpec::new("/a"));
        let first = first.unwrap();
        let (second, effects) = modals.open(ModalSpec::new("/b"));
        let second = second.unwrap();

        assert_eq!(effects[0], OverlayEffect::Remove { id: first.id() });
        assert!(matches!(effects[1], OverlayEffect::Mount { id, .. } if id == second.id()));
        assert_eq!(modals.current(), Some(second));
        assert!(modals.close(first).is_empty());
    }

    #[test]
    fn backdrop_click_closes_after_transition() {
        let mut modals = ModalLauncher::new();
        let handle = modals.open(ModalSpec::new("/a")).0.unwrap();

        assert!(modals.click(handle, ClickTarget::Content).is_empty());
        let effects = modals.click(handle, ClickTarget::Backdrop);
        let OverlayEffect::RemoveAfter { ticket, after, .. } = effects[1] else {
            panic!("expected delayed removal, got {effects:?}");
        };
        assert_eq!(after, MODAL_TRANSITION);
        assert!(!modals.is_open());
        assert_eq!(modals.current(), Some(handle));

        assert_eq!(modals.timer_elapsed(ticket), vec![OverlayEffect::Remove { id: handle.id() }]);
        assert!(modals.current().is_none());
    }

    #[test]
    fn close_current_is_immediate() {
        let mut modals = ModalLauncher::new();
        let handle = modals.open(ModalSpec::new("/a")).0.unwrap();
        let ticket = match modals.close(handle).as_slice() {
            [_, OverlayEffect::RemoveAfter { ticket, .. }] => *ticket,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(modals.close_current(), vec![OverlayEffect::Remove { id: handle.id() }]);
        assert!(modals.timer_elapsed(ticket).is_empty());
        assert!(modals.close_current().is_empty());
    }
}
