//! Grid presentation layer.
//!
//! Transforms controller state plus row data into a view model, and renders view
//! models as plain text for terminals and logs. A browser or desktop runtime
//! consumes the same [`GridViewModel`] and draws it with its own widgets.
//!
//! ```text
//! DataGridController + rows → view_model → GridViewModel → render_grid → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types and pager layout
//! - [`components`]: Text renderers for table, pager and empty state

pub mod components;
pub mod viewmodel;

pub use components::render_grid;
pub use viewmodel::{CellView, ColumnView, GridViewModel, PagerItem, PaginationView, RowView};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DataGridController;
    use crate::domain::{Alignment, ColumnDescriptor, ColumnSet, FilterState, PaginationState};
    use serde_json::json;

    #[test]
    fn renders_rows_and_pager() {
        let columns = ColumnSet::new(vec![
            ColumnDescriptor::text("name", "Name"),
            ColumnDescriptor::text("age", "Age").with_alignment(Alignment::Right),
        ])
        .unwrap();
        let mut grid = DataGridController::new(
            columns,
            Some(PaginationState { current_page: 1, page_size: 15, total_count: 2 }),
            FilterState::new(),
        )
        .with_selection(None);
        grid.on_selection_change(&[json!({"id": 2})]).unwrap();

        let text = render_grid(&grid.view_model(
            &[json!({"id": 1, "name": "Ann", "age": 31}), json!({"id": 2, "name": "Bob", "age": 7})],
            false,
        ));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "[ ]  Name  Age");
        assert_eq!(lines[2], "[ ]  Ann    31");
        assert_eq!(lines[3], "[x]  Bob     7");
        assert_eq!(lines[4], "Total 2  15/page    [1]  ");
    }

    #[test]
    fn loading_replaces_empty_placeholder() {
        let grid = DataGridController::new(ColumnSet::default(), None, FilterState::new());
        let text = render_grid(&grid.view_model(&[], true));
        assert!(text.contains("Loading..."));
        assert!(!text.contains("No data"));
    }
}
