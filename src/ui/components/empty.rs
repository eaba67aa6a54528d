//! Empty state placeholder.

/// Text shown in place of rows when the page is empty.
pub const EMPTY_TEXT: &str = "No data";

pub fn render_empty_state(out: &mut String) {
    out.push_str(EMPTY_TEXT);
    out.push('\n');
}
