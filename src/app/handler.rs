//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes host input and
//! timer reports, translating them into checklist mutations and action
//! sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the host (keys, timers, programmatic calls)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via [`Checklist`] methods, which fire listeners
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Items**: `AddItem`, `AddItems`, `RemoveItem`, `CommitRemoval`, `RemoveAllItems`
//! - **Toggling**: `ToggleItem`, `ToggleGroup`, `ToggleAllVisible`, `ToggleVisibleItems`
//! - **Navigation**: `CursorDown`, `CursorUp`, `ToggleAtCursor`, `CollapseAtCursor`
//! - **Search**: `SearchMode`, `SearchInput`, `Char`, `Backspace`, `ClearSearch`, `ExitSearch`
//! - **System**: `TimerElapsed`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use tickbox::app::{handle_event, Event};
//! use tickbox::{initialize, Config};
//!
//! let mut checklist = initialize(&Config::default())?;
//! let (render, _actions) = handle_event(&mut checklist, &Event::SearchMode)?;
//! assert!(render);
//! # Ok::<(), tickbox::TickboxError>(())
//! ```

use super::modes::InputMode;
use crate::app::{Action, Checklist};
use crate::domain::Result;
use crate::notify::TimerToken;
use serde_json::Value;

/// Events triggered by user input, timers, or the embedding program.
///
/// The handler processes these sequentially, so state transitions are
/// deterministic for a given event order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Adds or overwrites one item from a raw record.
    AddItem(Value),
    /// Adds an array of raw records.
    AddItems(Value),
    /// Starts the removal grace period for an item.
    RemoveItem {
        /// Key of the item to remove.
        key: String,
    },
    /// Reports that a removal grace period has ended.
    CommitRemoval {
        /// Key passed in the matching `Action::ScheduleRemoval`.
        key: String,
    },
    /// Removes every item at once.
    RemoveAllItems,

    /// Advances one item to its next state.
    ToggleItem {
        /// Key of the item.
        key: String,
    },
    /// Advances every enabled item in a group.
    ToggleGroup {
        /// Group name.
        group: String,
    },
    /// Advances every visible enabled item ("select all visible").
    ToggleAllVisible,
    /// Keyboard bulk toggle over visible items, followed by a search reset.
    ToggleVisibleItems {
        /// Targets the alternate state instead of the primary one.
        alternate: bool,
    },
    /// Folds or unfolds a group.
    ToggleGroupCollapse {
        /// Group name.
        group: String,
    },

    /// Replaces the search query.
    SearchInput(String),
    /// Appends a character to the search query (search mode only).
    Char(char),
    /// Removes the last character from the search query (search mode only).
    Backspace,
    /// Resets the search query.
    ClearSearch,
    /// Gives the search input focus.
    SearchMode,
    /// Clears the query and returns to normal mode.
    ExitSearch,

    /// Moves the cursor down by one row (wraps to top).
    CursorDown,
    /// Moves the cursor up by one row (wraps to bottom).
    CursorUp,
    /// Toggles the item or group under the cursor.
    ToggleAtCursor,
    /// Toggles the group containing the cursor.
    ToggleGroupAtCursor,
    /// Folds or unfolds the group containing the cursor.
    CollapseAtCursor,

    /// Reports an elapsed host timer.
    TimerElapsed(TimerToken),
    /// Hides the checklist UI.
    CloseFocus,
}

impl Event {
    /// Maps a named host message (e.g. a `zellij pipe` call) to an event.
    ///
    /// `add_item` and `add_items` carry JSON; key and group names are taken
    /// from the trimmed payload. Unknown names and unparsable JSON yield `None`.
    #[must_use]
    pub fn from_message(name: &str, payload: &str) -> Option<Self> {
        let parse = |payload: &str| match serde_json::from_str::<Value>(payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring message payload that is not JSON");
                None
            }
        };
        let key = payload.trim().to_string();

        Some(match name {
            "add_item" => Self::AddItem(parse(payload)?),
            "add_items" => Self::AddItems(parse(payload)?),
            "remove_item" => Self::RemoveItem { key },
            "remove_all_items" => Self::RemoveAllItems,
            "toggle_item" => Self::ToggleItem { key },
            "toggle_group" => Self::ToggleGroup { group: key },
            "toggle_all_visible" => Self::ToggleAllVisible,
            "search" => Self::SearchInput(payload.to_string()),
            "clear_search" => Self::ClearSearch,
            other => {
                tracing::debug!(name = %other, "ignoring message with unknown name");
                return None;
            }
        })
    }
}

/// Processes an event, mutates the checklist, and returns actions to execute.
///
/// The returned flag tells the host whether a re-render is needed.
///
/// # Errors
///
/// Returns [`crate::TickboxError::InvalidItem`] or
/// [`crate::TickboxError::InvalidItems`] for malformed add payloads.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut Checklist, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::AddItem(record) => Ok((true, state.add_item(record)?)),
        Event::AddItems(records) => Ok((true, state.add_items(records)?)),
        Event::RemoveItem { key } => {
            let actions = state.remove_item(key);
            Ok((!actions.is_empty(), actions))
        }
        Event::CommitRemoval { key } => {
            let actions = state.commit_removal(key);
            Ok((!actions.is_empty(), actions))
        }
        Event::RemoveAllItems => Ok((true, state.remove_all_items())),

        Event::ToggleItem { key } => Ok((state.toggle_item(key).is_some(), vec![])),
        Event::ToggleGroup { group } => Ok((state.toggle_group(group).is_some(), vec![])),
        Event::ToggleAllVisible => Ok((state.toggle_all_visible().is_some(), vec![])),
        Event::ToggleVisibleItems { alternate } => {
            let actions = state.toggle_visible_items(*alternate);
            Ok((true, actions))
        }
        Event::ToggleGroupCollapse { group } => {
            Ok((state.toggle_group_collapse(group).is_some(), vec![]))
        }

        Event::SearchInput(query) => Ok((true, state.search_input(query))),
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            let actions = state.push_search_char(*c);
            tracing::trace!(query = %state.query(), char = %c, "search query updated");
            Ok((true, actions))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            Ok((true, state.pop_search_char()))
        }
        Event::ClearSearch => Ok((true, state.clear_search())),
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.query(), "exiting search mode");
            state.input_mode = InputMode::Normal;
            if state.query().is_empty() {
                return Ok((true, vec![]));
            }
            Ok((true, state.clear_search()))
        }

        Event::CursorDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::ToggleAtCursor => Ok((state.toggle_at_cursor(), vec![])),
        Event::ToggleGroupAtCursor => Ok((state.toggle_group_at_cursor(), vec![])),
        Event::CollapseAtCursor => Ok((state.collapse_at_cursor(), vec![])),

        Event::TimerElapsed(token) => {
            state.timer_elapsed(*token);
            Ok((false, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}
