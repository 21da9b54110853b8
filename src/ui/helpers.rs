//! Shared rendering utilities and helpers.
//!
//! Low-level text utilities used across multiple UI components: cursor
//! positioning, query highlighting and check mark glyphs. Renderers write into
//! a `String` frame buffer that the host prints in one go.
//!
//! # Example
//!
//! ```rust
//! use tickbox::ui::helpers::substring_ranges;
//!
//! assert_eq!(substring_ranges("Banana", "an"), vec![(1, 3), (3, 5)]);
//! ```

use crate::domain::{StateSet, StateValue};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CheckMark;

/// Appends an ANSI sequence moving the cursor to `row`, `col` (1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Maps a state value to its display form.
///
/// The first state is unchecked, the last is checked, anything in between is
/// partial. Values outside the set render as unchecked.
#[must_use]
pub fn check_mark(states: &StateSet, value: StateValue) -> CheckMark {
    match states.position(value) {
        Some(0) | None => CheckMark::Unchecked,
        Some(idx) if idx + 1 == states.len() => CheckMark::Checked,
        Some(_) => CheckMark::Partial,
    }
}

/// Cuts `text` to at most `width` characters.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Appends `text` centered in a line of `cols` characters, truncating if needed.
pub fn push_centered(out: &mut String, text: &str, cols: usize) {
    let text = truncate_to_width(text, cols);
    let text_len = text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    out.push_str(&" ".repeat(padding));
    out.push_str(&text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + text_len)));
}

#[must_use]
pub const fn checkbox_glyph(mark: CheckMark) -> &'static str {
    match mark {
        CheckMark::Unchecked => "[ ]",
        CheckMark::Partial => "[-]",
        CheckMark::Checked => "[x]",
    }
}

/// Character ranges of every non-overlapping occurrence of `lower_query` in `text`.
///
/// Matching is case-insensitive; `lower_query` must already be lowercase.
/// Returns no ranges for an empty query, or when lowercasing changes the
/// character count of `text` (indices would not line up).
#[must_use]
pub fn substring_ranges(text: &str, lower_query: &str) -> Vec<(usize, usize)> {
    if lower_query.is_empty() {
        return vec![];
    }

    let lower_text = text.to_lowercase();
    if lower_text.chars().count() != text.chars().count() {
        return vec![];
    }

    let query_len = lower_query.chars().count();
    let mut ranges = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = lower_text[search_from..].find(lower_query) {
        let byte_start = search_from + offset;
        let start = lower_text[..byte_start].chars().count();
        ranges.push((start, start + query_len));
        search_from = byte_start + lower_query.len();
    }

    ranges
}

/// Appends text with highlighted character ranges for query matches.
///
/// When `is_cursor` is `true`, match highlighting is skipped so the cursor
/// colors stay intact.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_cursor: bool,
) {
    if ranges.is_empty() || is_cursor {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            out.extend(&chars[current_pos..start]);
        }

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        out.extend(&chars[current_pos..]);
    }
}
