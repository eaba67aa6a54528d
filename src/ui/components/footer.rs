//! Pagination bar renderer.
//!
//! Mirrors the console's `total, sizes, prev, pager, next` layout:
//!
//! ```text
//! Total 47  15/page  < 1 [2] 3 4 >
//! ```

use crate::ui::viewmodel::{PaginationView, PagerItem};
use std::fmt::Write;

/// Appends the pagination bar to `out`.
pub fn render_pagination(out: &mut String, pagination: &PaginationView) {
    let pager: Vec<String> = pagination
        .pager
        .iter()
        .map(|item| match item {
            PagerItem::Page(p) if *p == pagination.current_page => format!("[{p}]"),
            PagerItem::Page(p) => p.to_string(),
            PagerItem::Ellipsis => "...".to_string(),
        })
        .collect();

    let prev = if pagination.has_prev { "<" } else { " " };
    let next = if pagination.has_next { ">" } else { " " };

    let _ = writeln!(
        out,
        "Total {}  {}/page  {prev} {} {next}",
        pagination.total_count,
        pagination.page_size,
        pager.join(" ")
    );
}
