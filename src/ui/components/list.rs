//! Grouped item list renderer.
//!
//! Renders group headers, items and separators. Cursor rows get a full-width
//! background; disabled items are dimmed with their tooltip; items in their
//! removal grace period are struck through.

use crate::ui::helpers::{self, checkbox_glyph, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CheckMark, DisplayRow, GroupRow, ItemRow};

/// Renders all rows starting at the specified row.
///
/// Returns the next available row position.
pub fn render_rows(out: &mut String, row: usize, rows: &[DisplayRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for display_row in rows {
        current_row = match display_row {
            DisplayRow::Separator => render_separator(out, current_row, theme, cols),
            DisplayRow::Group(group) => render_group_row(out, current_row, group, theme, cols),
            DisplayRow::Item(item) => render_item_row(out, current_row, item, theme, cols),
        };
    }
    current_row
}

fn render_separator(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.border));
    out.push(' ');
    out.push_str(&"╌".repeat(cols.saturating_sub(2)));
    out.push(' ');
    out.push_str(Theme::reset());
    row + 1
}

fn check_color(theme: &Theme, mark: CheckMark) -> &str {
    match mark {
        CheckMark::Checked => &theme.colors.checked_fg,
        CheckMark::Partial => &theme.colors.partial_fg,
        CheckMark::Unchecked => &theme.colors.text_normal,
    }
}

fn begin_cursor_line(out: &mut String, theme: &Theme, is_cursor: bool, fg: &str) {
    if is_cursor {
        out.push_str(&Theme::fg(&theme.colors.cursor_fg));
        out.push_str(&Theme::bg(&theme.colors.cursor_bg));
    } else {
        out.push_str(&Theme::fg(fg));
    }
}

/// ```text
/// ▾ [-] Fruit (3)                                              Select All
/// ```
fn render_group_row(out: &mut String, row: usize, group: &GroupRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    begin_cursor_line(out, theme, group.is_cursor, &theme.colors.group_fg);
    out.push_str(Theme::bold());

    let arrow = if group.collapsed { "▸" } else { "▾" };
    let mut left = format!(" {arrow} ");
    if group.select_all_enabled {
        if !group.is_cursor {
            out.push_str(&left);
            out.push_str(&Theme::fg(check_color(theme, group.check)));
            left.clear();
        }
        left.push_str(checkbox_glyph(group.check));
        left.push(' ');
    }
    out.push_str(&left);
    if !group.is_cursor {
        out.push_str(&Theme::fg(&theme.colors.group_fg));
    }

    let title = format!("{} ({})", group.name, group.item_count);
    let prefix_len = if group.select_all_enabled { 7 } else { 3 };
    let hint = if group.select_all_enabled {
        format!("{} ", group.select_all_label)
    } else {
        String::new()
    };
    let hint_len = hint.chars().count();
    let title = truncate_to_width(&title, cols.saturating_sub(prefix_len + hint_len + 1));
    let title_len = title.chars().count();
    out.push_str(&title);
    out.push_str(&" ".repeat(cols.saturating_sub(prefix_len + title_len + hint_len)));

    if !group.is_cursor {
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }
    out.push_str(&hint);
    out.push_str(Theme::reset());
    row + 1
}

/// ```text
///     [x] Apple
///     [ ] Dill  This item is disabled
/// ```
fn render_item_row(out: &mut String, row: usize, item: &ItemRow, theme: &Theme, cols: usize) -> usize {
    const INDENT: &str = "    ";

    position_cursor(out, row, 1);
    let base_fg = if item.disabled {
        &theme.colors.disabled_fg
    } else {
        &theme.colors.text_normal
    };
    begin_cursor_line(out, theme, item.is_cursor, base_fg);
    if item.removing {
        out.push_str(Theme::dim());
        out.push_str(Theme::strikethrough());
    }

    out.push_str(INDENT);
    if !item.is_cursor && !item.disabled {
        out.push_str(&Theme::fg(check_color(theme, item.check)));
    }
    out.push_str(checkbox_glyph(item.check));
    out.push(' ');
    if !item.is_cursor {
        out.push_str(&Theme::fg(base_fg));
    }

    if item.disabled {
        out.push_str(&item.label);
    } else {
        helpers::render_highlighted_text(out, &item.label, &item.highlight_ranges, theme, item.is_cursor);
    }

    let mut line_len = INDENT.len() + 4 + item.label.chars().count();
    if let Some(tooltip) = &item.tooltip {
        let tooltip = truncate_to_width(tooltip, cols.saturating_sub(line_len + 2));
        out.push_str("  ");
        if !item.is_cursor {
            out.push_str(Theme::dim());
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        out.push_str(&tooltip);
        line_len += 2 + tooltip.chars().count();
    }

    out.push_str(&" ".repeat(cols.saturating_sub(line_len)));
    out.push_str(Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StateValue;

    fn item(key: &str, disabled: bool) -> ItemRow {
        ItemRow {
            key: key.to_string(),
            label: format!("Label {key}"),
            state: StateValue(0),
            check: CheckMark::Unchecked,
            disabled,
            tooltip: disabled.then(|| "This item is disabled".to_string()),
            removing: false,
            is_cursor: false,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn test_rows_advance_one_line_each() {
        let rows = vec![
            DisplayRow::Separator,
            DisplayRow::Item(item("a", false)),
            DisplayRow::Item(item("b", true)),
        ];
        let mut out = String::new();
        assert_eq!(render_rows(&mut out, 7, &rows, &Theme::default(), 60), 10);
        assert!(out.contains("Label a"));
        assert!(out.contains("This item is disabled"));
    }

    #[test]
    fn test_group_row_shows_select_all_hint() {
        let group = GroupRow {
            name: "Fruit".to_string(),
            collapsed: true,
            item_count: 2,
            check: CheckMark::Partial,
            select_all_label: "Select All".to_string(),
            select_all_enabled: true,
            is_cursor: false,
        };
        let mut out = String::new();
        render_rows(&mut out, 1, &[DisplayRow::Group(group)], &Theme::default(), 60);
        assert!(out.contains("Fruit (2)"));
        assert!(out.contains("Select All"));
        assert!(out.contains("[-]"));
        assert!(out.contains('▸'));
    }
}
