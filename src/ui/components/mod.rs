//! Composable grid component renderers.
//!
//! # Components
//!
//! - `table`: header row, rule and body rows
//! - `footer`: pagination bar
//! - `empty`: placeholder shown when there are no rows
//!
//! # Example
//!
//! ```rust
//! use consolekit::app::DataGridController;
//! use consolekit::domain::{ColumnDescriptor, ColumnSet, FilterState};
//! use consolekit::ui::render_grid;
//!
//! let columns = ColumnSet::new(vec![ColumnDescriptor::text("name", "Name")])?;
//! let grid = DataGridController::new(columns, None, FilterState::new());
//! let text = render_grid(&grid.view_model(&[], false));
//! assert!(text.contains("No data"));
//! # Ok::<(), consolekit::ConsoleError>(())
//! ```

mod empty;
mod footer;
mod table;

use crate::ui::viewmodel::GridViewModel;

use empty::render_empty_state;
use footer::render_pagination;
use table::render_table;

/// Renders a complete grid (table, loading or empty placeholder, pager) to text.
#[must_use]
pub fn render_grid(vm: &GridViewModel) -> String {
    let mut out = String::new();
    render_table(&mut out, vm);
    if vm.loading {
        out.push_str("Loading...\n");
    } else if vm.is_empty() {
        render_empty_state(&mut out);
    }
    render_pagination(&mut out, &vm.pagination);
    out
}
