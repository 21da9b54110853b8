//! Composable UI component renderers.
//!
//! Each component renders one part of the frame into a `String` buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - [`search`]: Search input box (border, query or placeholder, clear hint)
//! - [`header`]: Select-all-visible line with selection counts
//! - [`list`]: Group headers, items and separators
//! - [`empty`]: Status message for empty results
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Search Bar - 3 lines]
//! [Select All Visible]
//! [Border]
//! [List Rows | Status Message]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod list;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChecklistViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use list::render_rows;
use search::render_search_bar;

/// Renders a horizontal border line at the specified row.
///
/// Returns the next available row position (row + 1).
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the full checklist frame.
pub fn render_checklist(out: &mut String, vm: &ChecklistViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);
    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, current_row, empty, theme, cols);
    } else {
        render_rows(out, current_row, &vm.rows, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_start, &vm.footer, theme, cols);
}
