//! View model types representing renderable UI state.
//!
//! View models are computed on demand from the checklist (see
//! `Checklist::compute_viewmodel`) and consumed by a [`crate::ui::Renderer`].
//! They contain no business logic, only display-ready data: check marks,
//! highlight ranges, cursor flags and texts.
//!
//! # Example
//!
//! ```rust
//! use tickbox::ui::viewmodel::{CheckMark, DisplayRow, ItemRow};
//! use tickbox::StateValue;
//!
//! let row = DisplayRow::Item(ItemRow {
//!     key: "a".to_string(),
//!     label: "Apple".to_string(),
//!     state: StateValue(1),
//!     check: CheckMark::Checked,
//!     disabled: false,
//!     tooltip: None,
//!     removing: false,
//!     is_cursor: true,
//!     highlight_ranges: vec![(0, 2)],
//! });
//! assert!(matches!(row, DisplayRow::Item(_)));
//! ```

use crate::domain::StateValue;

/// Complete view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistViewModel {
    /// Search input box.
    pub search_bar: SearchBarInfo,

    /// "Select all visible" line with selection counts.
    pub header: HeaderInfo,

    /// Rows inside the current viewport window.
    pub rows: Vec<DisplayRow>,

    /// Index of the cursor row within `rows`, if it is on screen.
    pub selected_index: Option<usize>,

    /// Status message shown when nothing matches or no items exist.
    pub empty_state: Option<EmptyState>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Display form of a state value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMark {
    /// The canonical unselected value.
    Unchecked,
    /// Any value between the first and the last state.
    Partial,
    /// The last state.
    Checked,
}

/// One rendered line of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    /// Horizontal rule shown instead of a header when the only group is the
    /// default one.
    Separator,
    Group(GroupRow),
    Item(ItemRow),
}

/// Group header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRow {
    pub name: String,
    pub collapsed: bool,
    /// Number of items in the group, visible or not.
    pub item_count: usize,
    /// Aggregate state of the group.
    pub check: CheckMark,
    /// Label of the per-group select-all control.
    pub select_all_label: String,
    /// False in single-select mode.
    pub select_all_enabled: bool,
    pub is_cursor: bool,
}

/// Item line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub key: String,
    /// Label, truncated to the viewport width.
    pub label: String,
    /// Raw state value, for hosts that style per state.
    pub state: StateValue,
    pub check: CheckMark,
    pub disabled: bool,
    /// Hint shown next to disabled items.
    pub tooltip: Option<String>,
    /// The item is in its removal grace period.
    pub removing: bool,
    pub is_cursor: bool,

    /// Character ranges of the label matching the query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Select-all-visible line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// False in single-select mode.
    pub select_all_enabled: bool,
    /// Aggregate state of the visible enabled items.
    pub check: CheckMark,
    pub selected_count: usize,
    pub total_count: usize,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Status message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// Search input display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
    /// Shown while the query is empty.
    pub placeholder: String,
    /// Hint for the clear control, shown while the query is not empty.
    pub clear_tooltip: String,
    /// Whether keystrokes go to the search input.
    pub focused: bool,
}
