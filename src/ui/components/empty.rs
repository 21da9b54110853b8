//! Status message renderer.
//!
//! Shown in place of the list when there are no items at all or when the
//! current query matches nothing.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the status message one line below `row`, centered.
///
/// Returns the row after the message.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let message_row = row + 1;

    position_cursor(out, message_row, 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    push_centered(out, &empty.message, cols);
    out.push_str(Theme::reset());

    message_row + 1
}
