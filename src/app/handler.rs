//! Event handling and state transition logic for the grid.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow:
//! 1. A user action or an external property update becomes a [`GridEvent`]
//! 2. [`handle_event`] pattern-matches the event and mutates [`GridState`]
//! 3. Notifications are built from the mutated state and returned
//!
//! Because notifications are built after the mutation, they can never carry
//! unapplied values. Because the handler takes `&mut GridState`, two events can
//! never interleave; the last event handled is authoritative.
//!
//! # Example
//!
//! ```rust
//! use consolekit::app::{handle_event, GridEvent, GridState};
//!
//! let mut state = GridState::default();
//! let notifications = handle_event(&mut state, &GridEvent::SetPage(3))?;
//! assert_eq!(state.pagination.current_page, 3);
//! assert_eq!(notifications.len(), 1);
//! # Ok::<(), consolekit::ConsoleError>(())
//! ```

use crate::app::state::{GridState, RowId};
use crate::app::GridNotification;
use crate::domain::error::{ConsoleError, Result};
use crate::domain::{clamp_page_size, FilterState, SortKey};

/// Externally supplied pagination values.
///
/// `None` leaves the local value alone, mirroring a property that was not
/// updated by the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationProps {
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    pub total_count: Option<u64>,
}

/// Inputs that drive the grid state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Jump to a page (one-based).
    SetPage(u32),
    /// Pick a page size from the size selector.
    SetPageSize(u32),
    /// Replace filters with the submitted form values.
    SubmitFilters(FilterState),
    /// Clear all filters.
    ResetFilters,
    /// Replace sort criteria.
    SetSort(Vec<SortKey>),
    /// Header checkbox toggled.
    ToggleSelectAll(bool),
    /// The rendering layer reports the selected rows.
    SelectionChanged(Vec<RowId>),
    /// The owner pushed new property values.
    SyncProps(PaginationProps),
    /// The server reported a new total.
    TotalCount(u64),
}

/// Processes an event, mutates grid state, and returns notifications to emit.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidInput`] for `SetPage(0)`; the state is left
/// untouched in that case.
pub fn handle_event(state: &mut GridState, event: &GridEvent) -> Result<Vec<GridNotification>> {
    let _span = tracing::debug_span!("grid_event", event = ?event).entered();

    match event {
        GridEvent::SetPage(page) => {
            if *page == 0 {
                return Err(ConsoleError::InvalidInput("page must be at least 1".to_string()));
            }
            state.pagination.current_page = *page;
            Ok(vec![page_change(state)])
        }
        GridEvent::SetPageSize(requested) => {
            let size = clamp_page_size(*requested);
            if size != *requested {
                tracing::debug!(requested, size, "page size clamped to allowed set");
            }
            state.pagination.page_size = size;
            state.reset_to_first_page();
            Ok(vec![page_change(state)])
        }
        GridEvent::SubmitFilters(values) => {
            state.filters.clone_from(values);
            state.reset_to_first_page();
            tracing::debug!(filter_count = state.filters.len(), "filters submitted");
            Ok(vec![page_change(state)])
        }
        GridEvent::ResetFilters => {
            state.filters.clear();
            state.reset_to_first_page();
            Ok(vec![page_change(state)])
        }
        GridEvent::SetSort(keys) => {
            state.sort.clone_from(keys);
            state.reset_to_first_page();
            Ok(vec![page_change(state)])
        }
        GridEvent::ToggleSelectAll(selected) => {
            state.all_selected = *selected;
            Ok(vec![GridNotification::SelectAllToggled { selected: *selected }])
        }
        GridEvent::SelectionChanged(ids) => {
            state.selection = ids.iter().cloned().collect();
            tracing::debug!(selected = state.selection.len(), "selection replaced");
            Ok(vec![])
        }
        GridEvent::SyncProps(props) => {
            if let Some(page) = props.current_page.filter(|&p| p >= 1) {
                state.pagination.current_page = page;
            }
            if let Some(size) = props.page_size.filter(|&s| s > 0) {
                state.pagination.page_size = size;
            }
            if let Some(total) = props.total_count {
                state.pagination.total_count = total;
            }
            Ok(vec![])
        }
        GridEvent::TotalCount(total) => {
            state.pagination.total_count = *total;
            Ok(vec![])
        }
    }
}

fn page_change(state: &GridState) -> GridNotification {
    GridNotification::PageChange {
        page: state.pagination.current_page,
        size: state.pagination.page_size,
        filters: state.filters.clone(),
        sort: state.sort.clone(),
    }
}
