//! Search bar component renderer.
//!
//! This module renders the search input box with a bordered frame, the query
//! (or the placeholder while it is empty) and the clear hint.

use crate::ui::helpers::{position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the search input box at the specified row.
///
/// ```text
/// [margin] ┌──────────────────────────────────┐ [margin]
/// [margin] │ / query          esc Clear Search │ [margin]
/// [margin] └──────────────────────────────────┘ [margin]
/// ```
///
/// The border uses `search_bar_border` while the box has focus and `border`
/// otherwise. Returns the next available row position (row + 3).
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border_color));
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let hint = if search.query.is_empty() {
        String::new()
    } else {
        format!("esc {} ", search.clear_tooltip)
    };
    let hint_len = hint.chars().count();
    let text_width = inner_width.saturating_sub(hint_len + 3);

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border_color));
    out.push('│');
    out.push_str(" / ");

    let text = if search.query.is_empty() {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        truncate_to_width(&search.placeholder, text_width)
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        truncate_to_width(&search.query, text_width)
    };
    let text_len = text.chars().count();
    out.push_str(&text);
    out.push_str(&" ".repeat(text_width.saturating_sub(text_len)));

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&hint);
    out.push_str(&Theme::fg(border_color));
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border_color));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}
