//! View model types representing a renderable grid.
//!
//! View models are computed from a [`DataGridController`] plus the rows the view
//! currently holds. They contain no business logic, only display-ready data:
//! typed cells per column render kind, selection flags and a pager laid out the
//! way the console's pagination bar shows it (first page, optional ellipsis, a
//! window of pages around the current one, optional ellipsis, last page).
//!
//! # Example
//!
//! ```rust
//! use consolekit::ui::viewmodel::{pager_items, PagerItem};
//!
//! assert_eq!(
//!     pager_items(1, 3),
//!     vec![PagerItem::Page(1), PagerItem::Page(2), PagerItem::Page(3)],
//! );
//! ```

use crate::app::{DataGridController, RowId};
use crate::domain::{Alignment, ColumnDescriptor, RenderKind, ALLOWED_PAGE_SIZES};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// Number of page buttons the pager shows, including first and last.
const PAGER_COUNT: u32 = 7;

/// Complete grid view model.
#[derive(Debug, Clone, PartialEq)]
pub struct GridViewModel {
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
    pub pagination: PaginationView,
    /// A request for rows is in flight.
    pub loading: bool,
    /// The selection column is shown.
    pub selectable: bool,
    /// Header checkbox state.
    pub all_selected: bool,
}

/// Header information for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub key: String,
    pub label: String,
    pub width: Option<String>,
    pub alignment: Alignment,
    pub kind: RenderKind,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: Option<RowId>,
    pub cells: Vec<CellView>,
    pub selectable: bool,
    pub selected: bool,
}

/// A cell, typed by its column's render kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    Text(String),
    Input(String),
    Switch(bool),
    Select {
        value: Value,
        /// Label of the matching option, if any.
        label: Option<String>,
    },
    Date {
        date: Option<NaiveDate>,
        /// Original value as text, shown when it does not parse.
        raw: String,
    },
}

impl CellView {
    /// Text shown for this cell in a read-only rendering.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(s) | Self::Input(s) => s.clone(),
            Self::Switch(on) => String::from(if *on { "on" } else { "off" }),
            Self::Select { value, label } => label.clone().unwrap_or_else(|| value_text(value)),
            Self::Date { date, raw } => date.map_or_else(|| raw.clone(), |d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Pager and size-selector state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub page_sizes: Vec<u32>,
    pub pager: Vec<PagerItem>,
    pub has_prev: bool,
    pub has_next: bool,
}

/// One pager slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerItem {
    Page(u32),
    Ellipsis,
}

impl GridViewModel {
    /// Builds the view model for `rows` under `grid`'s current state.
    #[must_use]
    pub fn compute(grid: &DataGridController, rows: &[Value], loading: bool) -> Self {
        let columns: Vec<ColumnView> = grid
            .columns()
            .iter()
            .map(|c| ColumnView {
                key: c.key.clone(),
                label: c.label.clone(),
                width: c.width.clone(),
                alignment: c.alignment,
                kind: c.render_kind,
            })
            .collect();

        let rows = rows
            .iter()
            .map(|row| {
                let id = grid.row_id(row);
                let selected = id.as_deref().is_some_and(|id| grid.state().is_selected(id));
                RowView {
                    cells: grid.columns().iter().map(|c| cell_for(c, row)).collect(),
                    selectable: grid.is_row_selectable(row),
                    selected,
                    id,
                }
            })
            .collect();

        let p = grid.pagination();
        let total_pages = p.total_pages();
        let current = p.current_page.min(total_pages);

        Self {
            columns,
            rows,
            pagination: PaginationView {
                current_page: p.current_page,
                page_size: p.page_size,
                total_count: p.total_count,
                total_pages,
                page_sizes: ALLOWED_PAGE_SIZES.to_vec(),
                pager: pager_items(current, total_pages),
                has_prev: p.current_page > 1,
                has_next: p.current_page < total_pages,
            },
            loading,
            selectable: grid.is_selectable(),
            all_selected: grid.state().all_selected,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Lays out pager slots for `current` of `total_pages`.
///
/// Small page counts list every page. Larger ones keep the first and last page,
/// a window around `current`, and collapse the rest into ellipses.
#[must_use]
pub fn pager_items(current: u32, total_pages: u32) -> Vec<PagerItem> {
    let total_pages = total_pages.max(1);
    let current = current.clamp(1, total_pages);
    let mut items = vec![PagerItem::Page(1)];
    if total_pages == 1 {
        return items;
    }

    let half = (PAGER_COUNT - 1) / 2;
    let (prev_more, next_more) = if total_pages > PAGER_COUNT {
        (current > PAGER_COUNT - half, current < total_pages - half)
    } else {
        (false, false)
    };

    let middle = match (prev_more, next_more) {
        (true, false) => (total_pages - (PAGER_COUNT - 2))..=(total_pages - 1),
        (false, true) => 2..=(PAGER_COUNT - 1),
        (true, true) => {
            let offset = PAGER_COUNT / 2 - 1;
            (current - offset)..=(current + offset)
        }
        (false, false) => 2..=(total_pages - 1),
    };

    if prev_more {
        items.push(PagerItem::Ellipsis);
    }
    items.extend(middle.map(PagerItem::Page));
    if next_more {
        items.push(PagerItem::Ellipsis);
    }
    items.push(PagerItem::Page(total_pages));
    items
}

fn cell_for(column: &ColumnDescriptor, row: &Value) -> CellView {
    let value = row.get(&column.key).unwrap_or(&Value::Null);
    match column.render_kind {
        RenderKind::Text => CellView::Text(value_text(value)),
        RenderKind::Input => CellView::Input(value_text(value)),
        RenderKind::Switch => CellView::Switch(value_truthy(value)),
        RenderKind::Select => CellView::Select {
            label: column.option_label(value).map(String::from),
            value: value.clone(),
        },
        RenderKind::Date => CellView::Date {
            date: parse_date(value),
            raw: value_text(value),
        },
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(s.as_str(), "true" | "1"),
        _ => false,
    }
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColumnSet, FilterState, PaginationState, SelectOption};
    use serde_json::json;
    use std::sync::Arc;

    use PagerItem::{Ellipsis, Page};

    #[test]
    fn pager_lists_all_pages_when_few() {
        assert_eq!(pager_items(2, 5), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
        assert_eq!(pager_items(1, 1), vec![Page(1)]);
    }

    #[test]
    fn pager_collapses_tail_near_start() {
        assert_eq!(
            pager_items(1, 20),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn pager_collapses_both_sides_in_middle() {
        assert_eq!(
            pager_items(10, 20),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10), Page(11), Page(12), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn pager_collapses_head_near_end() {
        assert_eq!(
            pager_items(20, 20),
            vec![Page(1), Ellipsis, Page(15), Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn cells_follow_render_kind() {
        let columns = ColumnSet::new(vec![
            ColumnDescriptor::text("name", "Name"),
            ColumnDescriptor::text("note", "Note").with_kind(RenderKind::Input),
            ColumnDescriptor::text("enabled", "Enabled").with_kind(RenderKind::Switch),
            ColumnDescriptor::select(
                "status",
                "Status",
                vec![SelectOption::new(1, "Active"), SelectOption::new(2, "Closed")],
            ),
            ColumnDescriptor::text("joined", "Joined").with_kind(RenderKind::Date),
        ])
        .unwrap();
        let grid = DataGridController::new(columns, None, FilterState::new());

        let vm = grid.view_model(
            &[json!({"id": 1, "name": "Ann", "enabled": 1, "status": 2, "joined": "2025-07-28"})],
            false,
        );
        let cells = &vm.rows[0].cells;
        assert_eq!(cells[0], CellView::Text("Ann".into()));
        assert_eq!(cells[1], CellView::Input(String::new()));
        assert_eq!(cells[2], CellView::Switch(true));
        assert_eq!(cells[3].display_text(), "Closed");
        assert_eq!(cells[4].display_text(), "2025-07-28");
    }

    #[test]
    fn unparsable_date_keeps_raw_text() {
        let cell = cell_for(
            &ColumnDescriptor::text("d", "D").with_kind(RenderKind::Date),
            &json!({"d": "someday"}),
        );
        assert_eq!(cell.display_text(), "someday");
    }

    #[test]
    fn pagination_view_reflects_state() {
        let columns = ColumnSet::new(vec![ColumnDescriptor::text("name", "Name")]).unwrap();
        let grid = DataGridController::new(
            columns,
            Some(PaginationState { current_page: 2, page_size: 15, total_count: 40 }),
            FilterState::new(),
        )
        .with_selection(Some(Arc::new(|row: &Value| row.get("id") != Some(&json!(2)))));

        let vm = grid.view_model(&[json!({"id": 1}), json!({"id": 2})], true);
        assert_eq!(vm.pagination.total_pages, 3);
        assert!(vm.pagination.has_prev);
        assert!(vm.pagination.has_next);
        assert_eq!(vm.pagination.page_sizes, vec![15, 30, 50, 100]);
        assert!(vm.loading);
        assert!(vm.rows[0].selectable);
        assert!(!vm.rows[1].selectable);
    }
}
