//! Notifications emitted by the grid controller.
//!
//! The event handler returns a `Vec<GridNotification>` after each mutation. The
//! owning view consumes them in order: a [`GridNotification::PageChange`] is its cue
//! to reload rows, a [`GridNotification::SelectAllToggled`] is forwarded to the
//! rendering layer, which reports the resulting rows back through
//! [`DataGridController::on_selection_change`](crate::app::DataGridController::on_selection_change).
//!
//! # Example
//!
//! ```rust
//! use consolekit::app::GridNotification;
//!
//! let n = GridNotification::SelectAllToggled { selected: true };
//! assert!(!n.requires_reload());
//! ```

use crate::domain::{FilterState, PageQuery, PaginationState, SortKey};

/// Change notifications carrying post-mutation state.
#[derive(Debug, Clone, PartialEq)]
pub enum GridNotification {
    /// Page, page size, filters or sort changed; rows must be reloaded.
    PageChange {
        /// Current page after the change.
        page: u32,
        /// Page size after the change.
        size: u32,
        /// Filters after the change.
        filters: FilterState,
        /// Sort after the change.
        sort: Vec<SortKey>,
    },

    /// The header checkbox was toggled.
    SelectAllToggled {
        /// New checkbox state.
        selected: bool,
    },
}

impl GridNotification {
    /// True if the view has to fetch rows in response.
    #[must_use]
    pub const fn requires_reload(&self) -> bool {
        matches!(self, Self::PageChange { .. })
    }

    /// The request query for a page change.
    #[must_use]
    pub fn page_query(&self) -> Option<PageQuery> {
        match self {
            Self::PageChange {
                page,
                size,
                filters,
                sort,
            } => {
                let pagination = PaginationState {
                    current_page: *page,
                    page_size: *size,
                    total_count: 0,
                };
                Some(PageQuery::build(&pagination, filters, sort))
            }
            Self::SelectAllToggled { .. } => None,
        }
    }
}
