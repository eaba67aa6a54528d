//! Table component renderer.
//!
//! Renders the grid body as a plain-text table: an optional selection column,
//! one column per descriptor sized to its widest cell, and per-column alignment.

use crate::domain::Alignment;
use crate::ui::viewmodel::{GridViewModel, RowView};
use std::fmt::Write;

/// Cells longer than this are truncated with `...`.
const MAX_CELL_WIDTH: usize = 32;

/// Gap between columns.
const COLUMN_GAP: &str = "  ";

/// Appends the header row and all body rows to `out`.
pub fn render_table(out: &mut String, vm: &GridViewModel) {
    let widths = column_widths(vm);

    if vm.selectable {
        out.push_str(if vm.all_selected { "[x]" } else { "[ ]" });
        out.push_str(COLUMN_GAP);
    }
    let header: Vec<String> = vm
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, &w)| pad(&truncate(&col.label), w, col.alignment))
        .collect();
    let _ = writeln!(out, "{}", header.join(COLUMN_GAP).trim_end());

    let rule_len = widths.iter().sum::<usize>()
        + COLUMN_GAP.len() * widths.len().saturating_sub(1)
        + if vm.selectable { 3 + COLUMN_GAP.len() } else { 0 };
    let _ = writeln!(out, "{}", "-".repeat(rule_len));

    for row in &vm.rows {
        render_row(out, vm, row, &widths);
    }
}

fn render_row(out: &mut String, vm: &GridViewModel, row: &RowView, widths: &[usize]) {
    if vm.selectable {
        let marker = match (row.selectable, row.selected) {
            (false, _) => " - ",
            (true, true) => "[x]",
            (true, false) => "[ ]",
        };
        out.push_str(marker);
        out.push_str(COLUMN_GAP);
    }
    let cells: Vec<String> = row
        .cells
        .iter()
        .zip(vm.columns.iter().zip(widths))
        .map(|(cell, (col, &w))| pad(&truncate(&cell.display_text()), w, col.alignment))
        .collect();
    let _ = writeln!(out, "{}", cells.join(COLUMN_GAP).trim_end());
}

fn column_widths(vm: &GridViewModel) -> Vec<usize> {
    vm.columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let body = vm
                .rows
                .iter()
                .filter_map(|r| r.cells.get(i))
                .map(|c| truncate(&c.display_text()).chars().count())
                .max()
                .unwrap_or(0);
            body.max(truncate(&col.label).chars().count())
        })
        .collect()
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_CELL_WIDTH {
        let kept: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    match alignment {
        Alignment::Left => format!("{text:<width$}"),
        Alignment::Center => format!("{text:^width$}"),
        Alignment::Right => format!("{text:>width$}"),
    }
}
