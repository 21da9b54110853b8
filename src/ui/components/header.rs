//! Select-all-visible line renderer.

use crate::ui::helpers::{checkbox_glyph, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CheckMark, HeaderInfo};

/// Renders the select-all line at the specified row.
///
/// ```text
/// [x] Select All Visible                                   3/10 selected
/// ```
///
/// In single-select mode the checkbox is omitted and only the counts remain.
/// Returns the next available row position (row + 1).
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    let mut left_len = 1;
    out.push(' ');
    if header.select_all_enabled {
        let color = match header.check {
            CheckMark::Checked => &theme.colors.checked_fg,
            CheckMark::Partial => &theme.colors.partial_fg,
            CheckMark::Unchecked => &theme.colors.header_fg,
        };
        out.push_str(&Theme::fg(color));
        out.push_str(checkbox_glyph(header.check));
        out.push_str(&Theme::fg(&theme.colors.header_fg));
        out.push(' ');
        out.push_str(&header.title);
        left_len += 4 + header.title.chars().count();
    }

    let counts = format!("{}/{} selected ", header.selected_count, header.total_count);
    let counts_len = counts.chars().count();
    out.push_str(&" ".repeat(cols.saturating_sub(left_len + counts_len)));
    out.push_str(Theme::reset());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&counts);
    out.push_str(Theme::reset());

    row + 1
}
