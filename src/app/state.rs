//! Checklist state management and view model computation.
//!
//! This module defines [`Checklist`], the central state container. It owns
//! the item store and wires the state engine, the filter engine and the
//! listener registry together, so every mutation follows the same path:
//! engine call, listener dispatch, host actions.
//!
//! # State Components
//!
//! - **Store**: all items, keyed and insertion-ordered
//! - **Filter**: the last-run query and the visibility it produced
//! - **Collapsed groups**: groups folded by manual header interaction
//! - **Cursor**: position within the focusable rows, for keyboard hosts
//! - **Input Mode**: controls keybinding interpretation and UI layout
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tickbox::{initialize, Config};
//!
//! let mut checklist = initialize(&Config::default())?;
//! checklist.add_items(&json!([
//!     {"id": "a", "label": "Apple", "optgroup": "Fruit"},
//!     {"id": "b", "label": "Banana", "optgroup": "Fruit"},
//! ]))?;
//! checklist.toggle_item("a");
//! assert_eq!(checklist.selected_keys(), vec!["a"]);
//! let viewmodel = checklist.compute_viewmodel(24, 80);
//! assert!(!viewmodel.rows.is_empty());
//! # Ok::<(), tickbox::TickboxError>(())
//! ```

use super::actions::{Action, REMOVAL_GRACE_PERIOD};
use super::modes::InputMode;
use crate::domain::{Item, Result, SelectMode, StateSet, StateValue};
use crate::engine::{FilterEngine, GroupTransition, ItemTransition, SearchStatus, StateEngine};
use crate::notify::{Listeners, SearchDebouncer, TimerToken};
use crate::store::{ItemStore, RecordMapper};
use crate::ui::helpers::{check_mark, substring_ranges};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ChecklistViewModel, DisplayRow, EmptyState, FooterInfo, GroupRow, HeaderInfo, ItemRow,
    SearchBarInfo,
};
use crate::Config;
use serde_json::Value;
use std::collections::HashSet;

/// Rows taken by the search box, header, borders and footer.
const CHROME_ROWS: usize = 8;

/// User-facing texts fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texts {
    pub search_placeholder: String,
    pub select_all_main: String,
    pub select_all_group: String,
    pub clear_search_tooltip: String,
    pub empty: String,
    pub disabled: String,
}

impl Texts {
    fn from_config(config: &Config) -> Self {
        Self {
            search_placeholder: config.search_placeholder.clone(),
            select_all_main: config.select_all_main_text.clone(),
            select_all_group: config.select_all_group_text.clone(),
            clear_search_tooltip: config.clear_search_tooltip.clone(),
            empty: config.empty_text.clone(),
            disabled: config.disabled_text.clone(),
        }
    }
}

/// A focusable row, as seen by the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// A group header.
    Group(String),
    /// An item, by key.
    Item(String),
}

enum LayoutRow<'a> {
    Separator,
    Group(String),
    Item(&'a Item),
}

/// Central checklist state container.
#[derive(Debug)]
pub struct Checklist {
    store: ItemStore,
    engine: StateEngine,
    filter: FilterEngine,
    listeners: Listeners,
    debouncer: SearchDebouncer,
    collapsed: HashSet<String>,
    max_selectable_items: usize,

    /// Texts shown by the renderer.
    pub texts: Texts,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Zero-based index into [`Checklist::rows`].
    ///
    /// Clamped after every change of the row set.
    pub cursor: usize,

    /// Result of the last filter pass or item change.
    pub search_status: SearchStatus,

    /// Status line text, `Some` while the status is shown.
    pub status_message: Option<String>,

    /// Color scheme for terminal rendering.
    pub theme: Theme,
}

impl Checklist {
    /// Creates a checklist from configuration and listeners.
    ///
    /// Initial items from `config.items` are loaded in order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TickboxError::Config`] for an invalid state list or
    /// field map.
    pub fn new(config: &Config, listeners: Listeners, theme: Theme) -> Result<Self> {
        let states = StateSet::new(config.states.iter().copied())?;
        let mapper = RecordMapper::new(&config.field_map)?;
        let store = ItemStore::new(
            mapper,
            states,
            config.default_group_text.clone(),
            config.keep_removed_states,
        );

        let mut checklist = Self {
            store,
            engine: StateEngine::new(config.select_mode),
            filter: FilterEngine::new(),
            listeners,
            debouncer: SearchDebouncer::new(),
            collapsed: HashSet::new(),
            max_selectable_items: config.max_selectable_items,
            texts: Texts::from_config(config),
            input_mode: InputMode::Normal,
            cursor: 0,
            search_status: SearchStatus::Empty,
            status_message: None,
            theme,
        };

        if config.items.is_empty() {
            checklist.refresh_after_items_changed();
        } else {
            checklist.add_items(&Value::Array(config.items.clone()))?;
        }

        Ok(checklist)
    }

    // ----- queries -------------------------------------------------------

    #[must_use]
    pub const fn store(&self) -> &ItemStore {
        &self.store
    }

    #[must_use]
    pub const fn states(&self) -> &StateSet {
        self.store.states()
    }

    #[must_use]
    pub const fn select_mode(&self) -> SelectMode {
        self.engine.mode()
    }

    /// The query of the last filter pass.
    #[must_use]
    pub fn query(&self) -> &str {
        self.filter.query()
    }

    #[must_use]
    pub fn item(&self, key: &str) -> Option<&Item> {
        self.store.get(key)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.store.size()
    }

    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        self.store.group_names()
    }

    #[must_use]
    pub fn grouped_items(&self) -> Vec<(String, Vec<&Item>)> {
        self.store.grouped_items()
    }

    #[must_use]
    pub fn visible_items(&self, include_disabled: bool) -> Vec<&Item> {
        self.store.visible_items(include_disabled)
    }

    #[must_use]
    pub fn selected_items(&self) -> Vec<&Item> {
        self.store.selected_items()
    }

    #[must_use]
    pub fn selected_keys(&self) -> Vec<String> {
        self.store.selected_keys()
    }

    /// Whether a group is shown under the current filter.
    #[must_use]
    pub fn group_visible(&self, group: &str) -> bool {
        self.filter.group_visible(&self.store, group)
    }

    #[must_use]
    pub fn is_collapsed(&self, group: &str) -> bool {
        self.collapsed.contains(group)
    }

    /// Aggregate state of an arbitrary set of items, by key.
    ///
    /// Unknown keys are ignored.
    #[must_use]
    pub fn aggregate_state(&self, keys: &[String]) -> StateValue {
        StateEngine::resolve_aggregate_state(
            self.store.states(),
            keys.iter().filter_map(|key| self.store.get(key)),
        )
    }

    /// Aggregate state of every item in a group.
    #[must_use]
    pub fn group_state(&self, group: &str) -> StateValue {
        StateEngine::resolve_aggregate_state(self.store.states(), self.store.items_in_group(group))
    }

    fn selected_snapshot(&self) -> Vec<Item> {
        self.store.selected_items().into_iter().cloned().collect()
    }

    fn visible_enabled_keys(&self) -> Vec<String> {
        self.store
            .visible_items(false)
            .into_iter()
            .map(|item| item.key.clone())
            .collect()
    }

    fn items_for(&self, keys: &[String]) -> Vec<Item> {
        keys.iter().filter_map(|key| self.store.get(key)).cloned().collect()
    }

    // ----- item lifecycle ----------------------------------------------

    /// Adds or overwrites one item from a raw record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TickboxError::InvalidItem`] if `record` is not an object.
    pub fn add_item(&mut self, record: &Value) -> Result<Vec<Action>> {
        let item = self.store.add(record)?;
        tracing::debug!(key = %item.key, group = %item.group, "item added");
        Ok(self.refresh_after_items_changed())
    }

    /// Adds a batch of records with a single change notification.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TickboxError::InvalidItems`] if `records` is not an array.
    pub fn add_items(&mut self, records: &Value) -> Result<Vec<Action>> {
        let added = self.store.add_multiple(records)?;
        tracing::debug!(added, total = self.store.size(), "items added");
        Ok(self.refresh_after_items_changed())
    }

    /// Starts the removal grace period for an item.
    ///
    /// The item leaves the selection immediately and is deleted when the host
    /// reports back through [`Checklist::commit_removal`].
    pub fn remove_item(&mut self, key: &str) -> Vec<Action> {
        if self.store.mark_for_removal(key) {
            tracing::debug!(key = %key, "item marked for removal");
            return vec![Action::ScheduleRemoval {
                key: key.to_string(),
                delay: REMOVAL_GRACE_PERIOD,
            }];
        }

        if !self.store.contains(key) {
            tracing::warn!(key = %key, "remove requested for unknown item");
        }
        vec![]
    }

    /// Deletes an item whose grace period has ended.
    pub fn commit_removal(&mut self, key: &str) -> Vec<Action> {
        if self.store.commit_removal(key) {
            tracing::debug!(key = %key, "item removed");
            self.refresh_after_items_changed()
        } else {
            vec![]
        }
    }

    /// Removes every item at once.
    pub fn remove_all_items(&mut self) -> Vec<Action> {
        self.store.remove_all();
        tracing::debug!("all items removed");
        self.refresh_after_items_changed()
    }

    fn refresh_after_items_changed(&mut self) -> Vec<Action> {
        let outcome = self.filter.reapply(&mut self.store);
        let groups = self.store.group_names();
        self.collapsed.retain(|group| groups.contains(group));
        self.clamp_cursor();
        self.update_status(outcome.visible_count)
    }

    fn update_status(&mut self, visible_count: usize) -> Vec<Action> {
        if self.store.is_empty() || visible_count == 0 {
            self.search_status = SearchStatus::Empty;
            self.status_message = Some(self.texts.empty.clone());
            vec![Action::ShowStatus(self.texts.empty.clone())]
        } else {
            self.search_status = SearchStatus::HasResults;
            self.status_message = None;
            vec![Action::HideStatus]
        }
    }

    fn check_selection_limit(&self) {
        let selected = self.store.selected_items().len();
        if selected > self.max_selectable_items {
            tracing::warn!(
                selected,
                max_selectable_items = self.max_selectable_items,
                "selection exceeds the advisory limit"
            );
        }
    }

    // ----- state transitions ------------------------------------------

    /// Advances one item and fires `on_select` or `on_deselect`.
    ///
    /// Unknown and disabled items are ignored.
    pub fn toggle_item(&mut self, key: &str) -> Option<ItemTransition> {
        let transition = self.engine.advance_item(&mut self.store, key)?;

        if let Some(item) = self.store.get(key) {
            self.listeners.item_changed(&self.store, item, transition.selected);
        }
        self.check_selection_limit();

        Some(transition)
    }

    /// Advances every enabled item of a group and fires the group hook.
    ///
    /// Returns `None` for unknown groups and in single-select mode.
    pub fn toggle_group(&mut self, group: &str) -> Option<GroupTransition> {
        let keys: Vec<String> = self
            .store
            .items_in_group(group)
            .into_iter()
            .map(|item| item.key.clone())
            .collect();

        if keys.is_empty() {
            tracing::warn!(group = %group, "toggle requested for unknown group");
            return None;
        }

        let transition = self.engine.advance_group(&mut self.store, &keys)?;

        let items = self.items_for(&keys);
        self.listeners
            .group_changed(&self.store, group, &items, transition.selected);
        self.check_selection_limit();

        Some(transition)
    }

    /// Advances every visible enabled item as one set ("select all visible").
    pub fn toggle_all_visible(&mut self) -> Option<GroupTransition> {
        let keys = self.visible_enabled_keys();
        let transition = self.engine.advance_group(&mut self.store, &keys)?;

        let items = self.items_for(&keys);
        self.listeners
            .all_changed(&self.store, &items, transition.selected);
        self.check_selection_limit();

        Some(transition)
    }

    /// Keyboard bulk toggle over the visible items, then clears the search.
    ///
    /// The primary target is `states[1]`; `alternate` targets `states[2]`
    /// when the state set has one and falls back to the primary otherwise.
    pub fn toggle_visible_items(&mut self, alternate: bool) -> Vec<Action> {
        let states = self.store.states();
        let target = if alternate {
            states.get(2).or_else(|| states.get(1))
        } else {
            states.get(1)
        };

        if let Some(target) = target {
            let keys = self.visible_enabled_keys();
            if let Some(transition) = self.engine.toggle_toward(&mut self.store, &keys, target) {
                let items = self.items_for(&keys);
                self.listeners
                    .all_changed(&self.store, &items, transition.selected);
                self.check_selection_limit();
            }
        }

        self.clear_search()
    }

    /// Folds or unfolds a group and fires the collapse/expand hook.
    ///
    /// Returns the new collapsed flag, or `None` for unknown groups.
    pub fn toggle_group_collapse(&mut self, group: &str) -> Option<bool> {
        let items: Vec<Item> = self.store.items_in_group(group).into_iter().cloned().collect();
        if items.is_empty() {
            tracing::warn!(group = %group, "collapse requested for unknown group");
            return None;
        }

        let collapsed = if self.collapsed.remove(group) {
            false
        } else {
            self.collapsed.insert(group.to_string());
            true
        };

        tracing::debug!(group = %group, collapsed, "group collapse toggled");
        self.listeners
            .group_collapsed(&self.store, group, &items, collapsed);
        self.clamp_cursor();

        Some(collapsed)
    }

    // ----- search --------------------------------------------------------

    /// Handles a raw change of the search input.
    ///
    /// Fires `on_search_input` right away, (re)schedules the delayed hook and
    /// runs a filter pass.
    pub fn search_input(&mut self, query: &str) -> Vec<Action> {
        let _span = tracing::debug_span!("search_input", query_len = query.len()).entered();

        let selected = self.selected_snapshot();
        let mut actions = Vec::new();

        if self.listeners.wants_search_delay() {
            let timer = self.debouncer.schedule(query, selected.clone());
            if let Some(token) = timer.cancelled {
                actions.push(Action::CancelTimer { token });
            }
            actions.push(Action::ScheduleTimer {
                token: timer.token,
                delay: timer.delay,
            });
        }

        self.listeners.search_input(query, &selected);
        actions.extend(self.perform_local_search(query));
        actions
    }

    fn perform_local_search(&mut self, query: &str) -> Vec<Action> {
        let outcome = self.filter.apply(&mut self.store, query);

        let store = &self.store;
        let filter = &self.filter;
        self.collapsed.retain(|group| !filter.group_visible(store, group));
        self.clamp_cursor();

        let actions = self.update_status(outcome.visible_count);

        let selected = self.selected_snapshot();
        self.listeners.local_search_result(&outcome.query, &selected);

        actions
    }

    /// Appends a character to the query.
    pub fn push_search_char(&mut self, c: char) -> Vec<Action> {
        let mut query = self.filter.query().to_string();
        query.push(c);
        self.search_input(&query)
    }

    /// Removes the last character of the query.
    pub fn pop_search_char(&mut self) -> Vec<Action> {
        let mut query = self.filter.query().to_string();
        if query.pop().is_none() {
            return vec![];
        }
        self.search_input(&query)
    }

    /// Resets the query as an input change, then fires `on_clear_search`.
    pub fn clear_search(&mut self) -> Vec<Action> {
        let actions = self.search_input("");
        let selected = self.selected_snapshot();
        self.listeners.clear_search(&selected);
        tracing::debug!("search cleared");
        actions
    }

    /// Reports an elapsed host timer. Returns whether a hook fired.
    pub fn timer_elapsed(&mut self, token: TimerToken) -> bool {
        match self.debouncer.fire(token) {
            Some((query, selected)) => {
                self.listeners.search_input_delay(&query, &selected);
                true
            }
            None => false,
        }
    }

    // ----- cursor --------------------------------------------------------

    fn headers_hidden(&self, groups: &[(String, Vec<&Item>)]) -> bool {
        groups.len() == 1 && groups[0].0 == self.store.default_group()
    }

    fn layout(&self) -> Vec<LayoutRow<'_>> {
        let groups = self.store.grouped_items();
        let headers_hidden = self.headers_hidden(&groups);
        let mut rows = Vec::new();

        for (name, items) in groups {
            if headers_hidden {
                rows.push(LayoutRow::Separator);
            } else {
                if !self.filter.group_visible(&self.store, &name) {
                    continue;
                }
                let collapsed = self.collapsed.contains(&name);
                rows.push(LayoutRow::Group(name));
                if collapsed {
                    continue;
                }
            }

            rows.extend(items.into_iter().filter(|item| item.visible).map(LayoutRow::Item));
        }

        rows
    }

    /// Focusable rows in display order.
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        self.layout()
            .into_iter()
            .filter_map(|row| match row {
                LayoutRow::Separator => None,
                LayoutRow::Group(name) => Some(Row::Group(name)),
                LayoutRow::Item(item) => Some(Row::Item(item.key.clone())),
            })
            .collect()
    }

    #[must_use]
    pub fn cursor_row(&self) -> Option<Row> {
        self.rows().into_iter().nth(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let count = self.rows().len();
        self.cursor = if count == 0 { 0 } else { self.cursor.min(count - 1) };
    }

    /// Moves the cursor down by one row, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let count = self.rows().len();
        if count == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % count;
    }

    /// Moves the cursor up by one row, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let count = self.rows().len();
        if count == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { count - 1 } else { self.cursor - 1 };
    }

    fn cursor_group(&self) -> Option<String> {
        match self.cursor_row()? {
            Row::Group(name) => Some(name),
            Row::Item(key) => self.store.get(&key).map(|item| item.group.clone()),
        }
    }

    /// Toggles what the cursor points at: the item, or the whole group on a header.
    pub fn toggle_at_cursor(&mut self) -> bool {
        match self.cursor_row() {
            Some(Row::Item(key)) => self.toggle_item(&key).is_some(),
            Some(Row::Group(name)) => self.toggle_group(&name).is_some(),
            None => false,
        }
    }

    /// Toggles the group containing the cursor.
    pub fn toggle_group_at_cursor(&mut self) -> bool {
        self.cursor_group()
            .is_some_and(|group| self.toggle_group(&group).is_some())
    }

    /// Folds or unfolds the group containing the cursor.
    pub fn collapse_at_cursor(&mut self) -> bool {
        let groups = self.store.grouped_items();
        if self.headers_hidden(&groups) {
            return false;
        }
        drop(groups);

        let Some(group) = self.cursor_group() else {
            return false;
        };
        let changed = self.toggle_group_collapse(&group).is_some();

        // keep the cursor on the header of the folded group
        if let Some(idx) = self
            .rows()
            .iter()
            .position(|row| *row == Row::Group(group.clone()))
        {
            self.cursor = idx;
        }
        changed
    }

    // ----- view model ----------------------------------------------------

    /// Computes a renderable view model for a viewport of `rows` × `cols`.
    ///
    /// Rows are windowed around the cursor so that it stays visible. Pass
    /// `usize::MAX` as `rows` to get every row.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> ChecklistViewModel {
        let states = self.store.states();
        let lower_query = self.filter.query().to_lowercase();
        let multiple = self.engine.mode() == SelectMode::Multiple;

        let mut display_rows = Vec::new();
        let mut cursor_index = None;
        let mut focus = 0;

        for row in self.layout() {
            match row {
                LayoutRow::Separator => display_rows.push(DisplayRow::Separator),
                LayoutRow::Group(name) => {
                    let is_cursor = focus == self.cursor;
                    focus += 1;
                    if is_cursor {
                        cursor_index = Some(display_rows.len());
                    }
                    display_rows.push(DisplayRow::Group(GroupRow {
                        check: check_mark(states, self.group_state(&name)),
                        collapsed: self.collapsed.contains(&name),
                        item_count: self.store.items_in_group(&name).len(),
                        name,
                        select_all_label: self.texts.select_all_group.clone(),
                        select_all_enabled: multiple,
                        is_cursor,
                    }));
                }
                LayoutRow::Item(item) => {
                    let is_cursor = focus == self.cursor;
                    focus += 1;
                    if is_cursor {
                        cursor_index = Some(display_rows.len());
                    }
                    display_rows.push(DisplayRow::Item(self.compute_item_row(item, &lower_query, is_cursor, cols)));
                }
            }
        }

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let anchor = cursor_index.unwrap_or(0);
        let mut window_start = anchor.saturating_sub(available_rows / 2);
        let window_end = window_start.saturating_add(available_rows).min(display_rows.len());
        if window_end - window_start < available_rows {
            window_start = window_end.saturating_sub(available_rows);
        }

        let visible_keys = self.visible_enabled_keys();

        ChecklistViewModel {
            search_bar: SearchBarInfo {
                query: self.filter.query().to_string(),
                placeholder: self.texts.search_placeholder.clone(),
                clear_tooltip: self.texts.clear_search_tooltip.clone(),
                focused: self.input_mode == InputMode::Search,
            },
            header: HeaderInfo {
                title: self.texts.select_all_main.clone(),
                select_all_enabled: multiple,
                check: check_mark(states, self.aggregate_state(&visible_keys)),
                selected_count: self.store.selected_items().len(),
                total_count: self.store.size(),
            },
            selected_index: cursor_index.map(|idx| idx - window_start),
            rows: display_rows.drain(window_start..window_end).collect(),
            empty_state: self.status_message.as_ref().map(|message| EmptyState {
                message: message.clone(),
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_item_row(&self, item: &Item, lower_query: &str, is_cursor: bool, cols: usize) -> ItemRow {
        const CHECKBOX_WIDTH: usize = 8;

        let max_label = cols.saturating_sub(CHECKBOX_WIDTH);
        let label = if item.label.chars().count() > max_label && max_label > 3 {
            let kept: String = item.label.chars().take(max_label - 3).collect();
            format!("{kept}...")
        } else {
            item.label.clone()
        };

        ItemRow {
            key: item.key.clone(),
            highlight_ranges: substring_ranges(&label, lower_query),
            label,
            state: item.value,
            check: check_mark(self.store.states(), item.value),
            disabled: item.disabled,
            tooltip: item.disabled.then(|| self.texts.disabled.clone()),
            removing: item.pending_removal,
            is_cursor,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let multiple = self.engine.mode() == SelectMode::Multiple;
        let keybindings = match (self.input_mode, multiple) {
            (InputMode::Search, true) => {
                "ESC: clear and exit  Enter: toggle visible  Shift+Enter: alternate state  Type to filter"
            }
            (InputMode::Search, false) => "ESC: clear and exit  Type to filter",
            (InputMode::Normal, true) => {
                "j/k: navigate  space: toggle  g: group  a: all visible  c: collapse  /: search  q: quit"
            }
            (InputMode::Normal, false) => "j/k: navigate  space: select  c: collapse  /: search  q: quit",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn checklist_with(config: Config, listeners: Listeners) -> Checklist {
        Checklist::new(&config, listeners, Theme::default()).unwrap()
    }

    fn fruit_and_veg(listeners: Listeners) -> Checklist {
        let mut checklist = checklist_with(Config::default(), listeners);
        checklist
            .add_items(&json!([
                {"id": "a", "label": "Apple", "optgroup": "Fruit"},
                {"id": "b", "label": "Banana", "optgroup": "Fruit"},
                {"id": "c", "label": "Carrot", "optgroup": "Veg"},
                {"id": "d", "label": "Dill", "optgroup": "Veg", "disabled": true},
            ]))
            .unwrap();
        checklist
    }

    #[test]
    fn test_empty_checklist_shows_status() {
        let checklist = checklist_with(Config::default(), Listeners::new());
        assert_eq!(checklist.status_message.as_deref(), Some("No items available"));
        assert_eq!(checklist.search_status, SearchStatus::Empty);
    }

    #[test]
    fn test_add_items_hides_status() {
        let mut checklist = checklist_with(Config::default(), Listeners::new());
        let actions = checklist.add_items(&json!([{"id": "a", "label": "Apple"}])).unwrap();
        assert_eq!(actions, vec![Action::HideStatus]);
        assert!(checklist.status_message.is_none());
    }

    #[test]
    fn test_initial_items_from_config() {
        let config = Config {
            items: vec![json!({"id": 1, "label": "One"}), json!({"id": 2, "label": "Two"})],
            ..Config::default()
        };
        let checklist = checklist_with(config, Listeners::new());
        assert_eq!(checklist.size(), 2);
        assert!(checklist.item("1").is_some());
    }

    #[test]
    fn test_invalid_states_fail_construction() {
        let config = Config {
            states: vec![0],
            ..Config::default()
        };
        assert!(Checklist::new(&config, Listeners::new(), Theme::default()).is_err());
    }

    #[test]
    fn test_group_hook_receives_group_items() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listeners = Listeners::new().on_select_group(move |_, group, items| {
            sink.borrow_mut().push((group.to_string(), items.len()));
        });

        let mut checklist = fruit_and_veg(listeners);
        let transition = checklist.toggle_group("Veg").unwrap();

        assert_eq!(transition.keys, vec!["c".to_string()]);
        assert_eq!(*seen.borrow(), vec![("Veg".to_string(), 2)]);
        assert_eq!(checklist.item("d").unwrap().value, StateValue(0));
    }

    #[test]
    fn test_toggle_unknown_group_is_noop() {
        let mut checklist = fruit_and_veg(Listeners::new());
        assert!(checklist.toggle_group("Nope").is_none());
        assert!(checklist.toggle_group_collapse("Nope").is_none());
    }

    #[test]
    fn test_select_all_visible_respects_filter() {
        let deselected = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&deselected);
        let listeners = Listeners::new().on_deselect_all(move |_, _| *sink.borrow_mut() += 1);

        let mut checklist = fruit_and_veg(listeners);
        checklist.search_input("fruit");

        let t = checklist.toggle_all_visible().unwrap();
        assert!(t.selected);
        assert_eq!(checklist.selected_keys(), vec!["a", "b"]);

        let t = checklist.toggle_all_visible().unwrap();
        assert!(!t.selected);
        assert_eq!(*deselected.borrow(), 1);
    }

    #[test]
    fn test_keyboard_toggle_uses_alternate_state_and_clears_search() {
        let config = Config {
            states: vec![0, 1, 2],
            ..Config::default()
        };
        let mut checklist = checklist_with(config, Listeners::new());
        checklist
            .add_items(&json!([
                {"id": "a", "label": "Apple"},
                {"id": "b", "label": "Banana"},
            ]))
            .unwrap();

        checklist.search_input("app");
        checklist.toggle_visible_items(true);

        assert_eq!(checklist.item("a").unwrap().value, StateValue(2));
        assert_eq!(checklist.item("b").unwrap().value, StateValue(0));
        assert_eq!(checklist.query(), "");
        assert_eq!(checklist.visible_items(true).len(), 2);
    }

    #[test]
    fn test_keyboard_toggle_clears_when_all_in_target() {
        let mut checklist = fruit_and_veg(Listeners::new());
        checklist.toggle_visible_items(false);
        assert_eq!(checklist.selected_keys(), vec!["a", "b", "c"]);

        checklist.toggle_visible_items(false);
        assert!(checklist.selected_keys().is_empty());
    }

    #[test]
    fn test_alternate_falls_back_to_primary_with_two_states() {
        let mut checklist = fruit_and_veg(Listeners::new());
        checklist.toggle_visible_items(true);
        assert_eq!(checklist.item("a").unwrap().value, StateValue(1));
    }

    #[test]
    fn test_collapse_fires_hooks_and_filter_expands() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let collapse_log = Rc::clone(&log);
        let expand_log = Rc::clone(&log);
        let listeners = Listeners::new()
            .on_collapse_group(move |_, group, _| collapse_log.borrow_mut().push(format!("collapse:{group}")))
            .on_expand_group(move |_, group, _| expand_log.borrow_mut().push(format!("expand:{group}")));

        let mut checklist = fruit_and_veg(listeners);
        assert_eq!(checklist.toggle_group_collapse("Fruit"), Some(true));
        assert!(checklist.is_collapsed("Fruit"));
        assert!(!checklist.rows().contains(&Row::Item("a".to_string())));

        checklist.search_input("app");
        assert!(!checklist.is_collapsed("Fruit"));
        assert_eq!(*log.borrow(), vec!["collapse:Fruit"]);

        checklist.toggle_group_collapse("Fruit");
        checklist.toggle_group_collapse("Fruit");
        assert_eq!(*log.borrow(), vec!["collapse:Fruit", "collapse:Fruit", "expand:Fruit"]);
    }

    #[test]
    fn test_search_hooks_and_debounce() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let input_log = Rc::clone(&log);
        let delay_log = Rc::clone(&log);
        let result_log = Rc::clone(&log);
        let listeners = Listeners::new()
            .on_search_input(move |query, _| input_log.borrow_mut().push(format!("input:{query}")))
            .on_search_input_delay(move |query, _| delay_log.borrow_mut().push(format!("delay:{query}")))
            .on_local_search_result(move |query, _| result_log.borrow_mut().push(format!("result:{query}")));

        let mut checklist = fruit_and_veg(listeners);
        let first = checklist.search_input("b");
        let second = checklist.search_input("ba");

        let token_of = |actions: &[Action]| {
            actions.iter().find_map(|a| match a {
                Action::ScheduleTimer { token, .. } => Some(*token),
                _ => None,
            })
        };
        let first_token = token_of(&first).unwrap();
        let second_token = token_of(&second).unwrap();
        assert!(second.contains(&Action::CancelTimer { token: first_token }));

        assert!(!checklist.timer_elapsed(first_token));
        assert!(checklist.timer_elapsed(second_token));

        assert_eq!(
            *log.borrow(),
            vec!["input:b", "result:b", "input:ba", "result:ba", "delay:ba"]
        );
    }

    #[test]
    fn test_no_timer_without_delay_hook() {
        let mut checklist = fruit_and_veg(Listeners::new());
        let actions = checklist.search_input("x");
        assert!(!actions.iter().any(|a| matches!(a, Action::ScheduleTimer { .. })));
    }

    #[test]
    fn test_empty_search_result_shows_status() {
        let mut checklist = fruit_and_veg(Listeners::new());
        let actions = checklist.search_input("zzz");
        assert!(actions.contains(&Action::ShowStatus("No items available".to_string())));
        assert_eq!(checklist.search_status, SearchStatus::Empty);

        let actions = checklist.clear_search();
        assert!(actions.contains(&Action::HideStatus));
    }

    #[test]
    fn test_clear_search_fires_once() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let listeners = Listeners::new().on_clear_search(move |_| *sink.borrow_mut() += 1);

        let mut checklist = fruit_and_veg(listeners);
        checklist.search_input("app");
        checklist.clear_search();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_removal_grace_period() {
        let mut checklist = fruit_and_veg(Listeners::new());
        checklist.toggle_item("a");

        let actions = checklist.remove_item("a");
        assert_eq!(
            actions,
            vec![Action::ScheduleRemoval {
                key: "a".to_string(),
                delay: REMOVAL_GRACE_PERIOD,
            }]
        );
        assert!(checklist.selected_keys().is_empty());
        assert_eq!(checklist.size(), 4);
        assert!(checklist.remove_item("a").is_empty());

        checklist.commit_removal("a");
        assert_eq!(checklist.size(), 3);
        assert!(checklist.remove_item("a").is_empty());
    }

    #[test]
    fn test_cursor_navigation_and_toggle() {
        let mut checklist = fruit_and_veg(Listeners::new());
        assert_eq!(checklist.cursor_row(), Some(Row::Group("Fruit".to_string())));

        checklist.move_cursor_down();
        assert_eq!(checklist.cursor_row(), Some(Row::Item("a".to_string())));
        assert!(checklist.toggle_at_cursor());
        assert_eq!(checklist.selected_keys(), vec!["a"]);

        checklist.move_cursor_up();
        checklist.move_cursor_up();
        assert_eq!(checklist.cursor_row(), Some(Row::Item("d".to_string())));
        assert!(!checklist.toggle_at_cursor());
    }

    #[test]
    fn test_single_default_group_hides_headers() {
        let mut checklist = checklist_with(Config::default(), Listeners::new());
        checklist
            .add_items(&json!([{"id": "a", "label": "Apple"}, {"id": "b", "label": "Banana"}]))
            .unwrap();

        assert_eq!(
            checklist.rows(),
            vec![Row::Item("a".to_string()), Row::Item("b".to_string())]
        );
        let vm = checklist.compute_viewmodel(usize::MAX, 80);
        assert!(matches!(vm.rows[0], DisplayRow::Separator));
        assert_eq!(vm.selected_index, Some(1));
        assert!(!checklist.collapse_at_cursor());
    }

    #[test]
    fn test_viewmodel_marks_disabled_and_highlights() {
        let mut checklist = fruit_and_veg(Listeners::new());
        checklist.search_input("ll");

        let vm = checklist.compute_viewmodel(usize::MAX, 80);
        let dill = vm
            .rows
            .iter()
            .find_map(|row| match row {
                DisplayRow::Item(item) if item.key == "d" => Some(item),
                _ => None,
            })
            .unwrap();

        assert!(dill.disabled);
        assert_eq!(dill.tooltip.as_deref(), Some("This item is disabled"));
        assert_eq!(dill.highlight_ranges, vec![(2, 4)]);
    }

    #[test]
    fn test_viewmodel_windows_around_cursor() {
        let mut checklist = checklist_with(Config::default(), Listeners::new());
        let records: Vec<Value> = (0..50).map(|i| json!({"id": i, "label": format!("Item {i}")})).collect();
        checklist.add_items(&Value::Array(records)).unwrap();

        for _ in 0..40 {
            checklist.move_cursor_down();
        }

        let vm = checklist.compute_viewmodel(20, 80);
        assert_eq!(vm.rows.len(), 20 - CHROME_ROWS);
        let idx = vm.selected_index.unwrap();
        assert!(matches!(&vm.rows[idx], DisplayRow::Item(item) if item.key == "40"));
    }
}
