//! The data-grid controller owned by a view.
//!
//! [`DataGridController`] wraps a [`GridState`] together with the read-only column
//! set and the selection rules. Each public operation translates into a
//! [`GridEvent`] and runs through [`handle_event`], so the controller and the bare
//! state machine always agree.

use crate::app::handler::{handle_event, GridEvent, PaginationProps};
use crate::app::state::{GridState, RowId};
use crate::app::GridNotification;
use crate::domain::error::Result;
use crate::domain::{ColumnSet, FilterState, Page, PageQuery, PaginationState, SortKey};
use crate::ui::viewmodel::GridViewModel;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Default field holding a row's identifier.
pub const DEFAULT_ROW_KEY: &str = "id";

/// Decides whether a row may be selected.
pub type RowPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Interaction state for one paginated, filterable, selectable grid.
pub struct DataGridController {
    columns: ColumnSet,
    state: GridState,
    row_key: String,
    selectable: bool,
    row_selectable: Option<RowPredicate>,
}

impl fmt::Debug for DataGridController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataGridController")
            .field("columns", &self.columns.len())
            .field("state", &self.state)
            .field("row_key", &self.row_key)
            .field("selectable", &self.selectable)
            .field("row_predicate", &self.row_selectable.is_some())
            .finish()
    }
}

impl DataGridController {
    /// Creates a controller from the view's descriptors.
    ///
    /// Missing pagination defaults to page 1, size 10, total 0.
    #[must_use]
    pub fn new(columns: ColumnSet, pagination: Option<PaginationState>, filters: FilterState) -> Self {
        if columns.is_empty() {
            tracing::debug!("grid created without columns; only pagination will render");
        }
        Self {
            columns,
            state: GridState::new(pagination.unwrap_or_default(), filters),
            row_key: DEFAULT_ROW_KEY.to_string(),
            selectable: false,
            row_selectable: None,
        }
    }

    /// Reads row identifiers from `key` instead of `id`.
    #[must_use]
    pub fn with_row_key(mut self, key: impl Into<String>) -> Self {
        self.row_key = key.into();
        self
    }

    /// Enables the selection column. `predicate` limits which rows qualify.
    #[must_use]
    pub fn with_selection(mut self, predicate: Option<RowPredicate>) -> Self {
        self.selectable = true;
        self.row_selectable = predicate;
        self
    }

    fn dispatch(&mut self, event: &GridEvent) -> Result<Vec<GridNotification>> {
        handle_event(&mut self.state, event)
    }

    /// Moves to `page`, keeping filters.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidInput`](crate::ConsoleError::InvalidInput) for page 0.
    pub fn set_page(&mut self, page: u32) -> Result<Vec<GridNotification>> {
        self.dispatch(&GridEvent::SetPage(page))
    }

    /// Changes the page size (clamped to the allowed set) and returns to page 1.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps every operation's signature uniform.
    pub fn set_page_size(&mut self, size: u32) -> Result<Vec<GridNotification>> {
        self.dispatch(&GridEvent::SetPageSize(size))
    }

    /// Replaces the filters and returns to page 1.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn submit_filters(&mut self, values: FilterState) -> Result<Vec<GridNotification>> {
        self.dispatch(&GridEvent::SubmitFilters(values))
    }

    /// Clears the filters and returns to page 1.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn reset_filters(&mut self) -> Result<Vec<GridNotification>> {
        self.dispatch(&GridEvent::ResetFilters)
    }

    /// Replaces the sort criteria and returns to page 1.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn set_sort(&mut self, keys: Vec<SortKey>) -> Result<Vec<GridNotification>> {
        self.dispatch(&GridEvent::SetSort(keys))
    }

    /// Forwards a header checkbox toggle. Row selection is left to the
    /// rendering layer, which reports back through [`Self::on_selection_change`].
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn toggle_select_all(&mut self, selected: bool) -> Result<Vec<GridNotification>> {
        self.dispatch(&GridEvent::ToggleSelectAll(selected))
    }

    /// Replaces the selection with the eligible rows among `rows`.
    ///
    /// Rows without a usable identifier are skipped.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn on_selection_change(&mut self, rows: &[Value]) -> Result<Vec<GridNotification>> {
        let ids: Vec<RowId> = rows
            .iter()
            .filter(|row| self.is_row_selectable(row))
            .filter_map(|row| {
                let id = self.row_id(row);
                if id.is_none() {
                    tracing::debug!(row_key = %self.row_key, "selected row has no identifier");
                }
                id
            })
            .collect();
        self.dispatch(&GridEvent::SelectionChanged(ids))
    }

    /// Applies property values pushed by the owner without emitting.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn sync_props(&mut self, props: PaginationProps) -> Result<Vec<GridNotification>> {
        self.dispatch(&GridEvent::SyncProps(props))
    }

    /// Records the total reported by the server.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn set_total_count(&mut self, total: u64) -> Result<Vec<GridNotification>> {
        self.dispatch(&GridEvent::TotalCount(total))
    }

    /// Adopts the pagination echoed back with a page of results.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn apply_page<T>(&mut self, page: &Page<T>) -> Result<Vec<GridNotification>> {
        self.sync_props(PaginationProps {
            current_page: Some(page.current_page),
            page_size: Some(page.page_size),
            total_count: Some(page.total_count),
        })
    }

    /// Request parameters for the current state.
    #[must_use]
    pub fn query(&self) -> PageQuery {
        self.state.query()
    }

    #[must_use]
    pub const fn state(&self) -> &GridState {
        &self.state
    }

    #[must_use]
    pub const fn pagination(&self) -> &PaginationState {
        &self.state.pagination
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.state.filters
    }

    #[must_use]
    pub const fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Whether `row` passes the selection predicate. Always false when the
    /// selection column is disabled.
    #[must_use]
    pub fn is_row_selectable(&self, row: &Value) -> bool {
        self.selectable && self.row_selectable.as_ref().map_or(true, |pred| pred(row))
    }

    /// Identifier of `row` read from the row-key field.
    #[must_use]
    pub fn row_id(&self, row: &Value) -> Option<RowId> {
        match row.get(&self.row_key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Renderable model for `rows` under the current state.
    #[must_use]
    pub fn view_model(&self, rows: &[Value], loading: bool) -> GridViewModel {
        GridViewModel::compute(self, rows, loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColumnDescriptor;
    use serde_json::json;

    fn controller() -> DataGridController {
        let columns = ColumnSet::new(vec![ColumnDescriptor::text("name", "Name")]).unwrap();
        DataGridController::new(columns, None, FilterState::new())
    }

    #[test]
    fn defaults_when_pagination_unset() {
        let grid = controller();
        assert_eq!(*grid.pagination(), PaginationState::default());
        assert!(grid.filters().is_empty());
    }

    #[test]
    fn selection_honors_predicate() {
        let mut grid = controller().with_selection(Some(Arc::new(|row: &Value| {
            row.get("locked").and_then(Value::as_bool) != Some(true)
        })));

        grid.on_selection_change(&[
            json!({"id": 1, "name": "a"}),
            json!({"id": 2, "name": "b", "locked": true}),
            json!({"id": "x-3", "name": "c"}),
            json!({"name": "no id"}),
        ])
        .unwrap();

        let selected: Vec<&str> = grid.state().selection.iter().map(String::as_str).collect();
        assert_eq!(selected, vec!["1", "x-3"]);
    }

    #[test]
    fn selection_disabled_selects_nothing() {
        let mut grid = controller();
        grid.on_selection_change(&[json!({"id": 1})]).unwrap();
        assert!(grid.state().selection.is_empty());
    }

    #[test]
    fn custom_row_key() {
        let grid = controller().with_row_key("uuid");
        assert_eq!(grid.row_id(&json!({"uuid": "abc", "id": 1})), Some("abc".to_string()));
    }

    #[test]
    fn apply_page_adopts_server_pagination() {
        let mut grid = controller();
        let page = Page {
            current_page: 2,
            page_size: 15,
            total_count: 47,
            items: vec![json!({"id": 1})],
        };
        let out = grid.apply_page(&page).unwrap();
        assert!(out.is_empty());
        assert_eq!(grid.pagination().total_count, 47);
        assert_eq!(grid.pagination().total_pages(), 4);
    }

    #[test]
    fn page_change_notification_matches_query() {
        let mut grid = controller();
        let mut filters = FilterState::new();
        filters.insert("name".into(), json!("bob"));
        let out = grid.submit_filters(filters).unwrap();
        assert_eq!(out[0].page_query(), Some(grid.query()));
    }
}
