//! Global loading mask.
//!
//! ```text
//! create ──► Visible ──hide/page load──► Fading ──timer──► Removed
//!              ▲                           │
//!              └────────── show ───────────┘
//! ```
//!
//! `destroy` jumps straight to `Removed` from any phase. Once removed the mask
//! cannot be shown again.

use crate::overlay::{Layer, OverlayEffect, OverlayId, TimerTicket};
use std::time::Duration;

/// Length of the fade-out before the mask is removed.
pub const LOADING_FADE: Duration = Duration::from_millis(600);

/// Default caption under the spinner.
pub const LOADING_TEXT: &str = "Loading";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Visible,
    Fading(TimerTicket),
    Removed,
}

#[derive(Debug)]
pub struct LoadingOverlay {
    phase: LoadingPhase,
    next_ticket: u64,
}

impl LoadingOverlay {
    /// Creates the mask. It is visible immediately.
    pub fn create(text: &str) -> (Self, Vec<OverlayEffect>) {
        tracing::debug!("mounting loading overlay");
        let overlay = Self {
            phase: LoadingPhase::Visible,
            next_ticket: 0,
        };
        let effects = vec![OverlayEffect::Mount {
            id: OverlayId::Loading,
            layer: Layer::Loading {
                text: text.to_string(),
            },
        }];
        (overlay, effects)
    }

    pub const fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub const fn is_visible(&self) -> bool {
        matches!(self.phase, LoadingPhase::Visible)
    }

    /// Makes the mask fully opaque again, cancelling a pending removal.
    pub fn show(&mut self) -> Vec<OverlayEffect> {
        match self.phase {
            LoadingPhase::Visible => Vec::new(),
            LoadingPhase::Fading(_) => {
                self.phase = LoadingPhase::Visible;
                vec![OverlayEffect::Transition {
                    id: OverlayId::Loading,
                    visible: true,
                    duration: Duration::ZERO,
                }]
            }
            LoadingPhase::Removed => {
                tracing::debug!("loading overlay already removed, ignoring show");
                Vec::new()
            }
        }
    }

    /// Fades the mask out and schedules its removal.
    pub fn hide(&mut self) -> Vec<OverlayEffect> {
        if self.phase != LoadingPhase::Visible {
            return Vec::new();
        }
        let ticket = TimerTicket(self.next_ticket);
        self.next_ticket += 1;
        self.phase = LoadingPhase::Fading(ticket);

        vec![
            OverlayEffect::Transition {
                id: OverlayId::Loading,
                visible: false,
                duration: LOADING_FADE,
            },
            OverlayEffect::RemoveAfter {
                id: OverlayId::Loading,
                ticket,
                after: LOADING_FADE,
            },
        ]
    }

    /// Page finished loading.
    pub fn on_page_load(&mut self) -> Vec<OverlayEffect> {
        self.hide()
    }

    pub fn timer_elapsed(&mut self, ticket: TimerTicket) -> Vec<OverlayEffect> {
        match self.phase {
            LoadingPhase::Fading(pending) if pending == ticket => {
                self.phase = LoadingPhase::Removed;
                vec![OverlayEffect::Remove { id: OverlayId::Loading }]
            }
            _ => {
                tracing::trace!(?ticket, "stale loading timer");
                Vec::new()
            }
        }
    }

    /// Removes the mask immediately.
    pub fn destroy(&mut self) -> Vec<OverlayEffect> {
        if self.phase == LoadingPhase::Removed {
            return Vec::new();
        }
        self.phase = LoadingPhase::Removed;
        vec![OverlayEffect::Remove { id: OverlayId::Loading }]
    }
}
