//! Grid interaction state.
//!
//! [`GridState`] is the single source of truth for a grid's pagination, filters,
//! sort and row selection. It holds no row data; rows belong to the owning view
//! and are only borrowed when a view model is computed.
//!
//! # State Components
//!
//! - **Pagination**: current page, page size, total count
//! - **Filters**: submitted filter values, keyed by field
//! - **Sort**: ordered sort criteria
//! - **Selection**: identifiers of the selected rows
//! - **Select-all**: header checkbox state as last toggled

use crate::domain::{FilterState, PageQuery, PaginationState, SortKey};
use std::collections::BTreeSet;

/// Identifier of a row, taken from the grid's row-key field.
pub type RowId = String;

/// Central grid state container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridState {
    /// Position within the result set.
    pub pagination: PaginationState,

    /// Filters as last submitted.
    pub filters: FilterState,

    /// Sort criteria, most significant first.
    pub sort: Vec<SortKey>,

    /// Currently selected rows.
    pub selection: BTreeSet<RowId>,

    /// Header checkbox state.
    pub all_selected: bool,
}

impl GridState {
    #[must_use]
    pub fn new(pagination: PaginationState, filters: FilterState) -> Self {
        Self {
            pagination,
            filters,
            ..Self::default()
        }
    }

    /// Returns to the first page. Called by every operation that changes which
    /// rows belong to the result set.
    pub fn reset_to_first_page(&mut self) {
        self.pagination.current_page = 1;
    }

    /// Request parameters for the current state.
    #[must_use]
    pub fn query(&self) -> PageQuery {
        PageQuery::build(&self.pagination, &self.filters, &self.sort)
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }
}
