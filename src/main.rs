//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the tickbox library and
//! the Zellij plugin system. It implements `ZellijPlugin` to translate keys,
//! timers and pipe messages into library events and to execute the resulting
//! actions.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create the `Checklist`
//! 2. **Subscribe**: Register for `Key` and `Timer` events
//! 3. **Update**: Handle events, delegate to the library layer
//! 4. **Pipe**: Accept item updates from `zellij pipe`
//! 5. **Render**: Print the frame produced by the ANSI renderer
//!
//! # Timers
//!
//! Zellij timers cannot be cancelled and report only their duration. The
//! plugin keeps one FIFO of tokens per timer kind; each `Timer` event pops the
//! oldest token of the matching kind. Cancelled search timers still elapse and
//! are discarded by the library as stale.
//!
//! # Pipe Messages
//!
//! ```text
//! zellij pipe --name add_items -- '[{"id": 1, "label": "Apple"}]'
//! zellij pipe --name add_item -- '{"id": 2, "label": "Pear"}'
//! zellij pipe --name remove_item -- 2
//! zellij pipe --name remove_all_items
//! zellij pipe --name toggle_item -- 1
//! zellij pipe --name search -- app
//! ```
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`: Move down
//! - `k`/`Up`: Move up
//! - `Space`/`Enter`: Toggle the item or group under the cursor
//! - `g`: Toggle the group containing the cursor
//! - `a`: Toggle all visible items
//! - `c`: Collapse or expand the group containing the cursor
//! - `/`: Enter search mode
//! - `q`/`Esc`: Close plugin
//!
//! In search mode:
//! - Printable keys: Type characters
//! - `Enter`: Toggle every visible item, then clear the search
//! - `Shift+Enter`: Same, toward the alternate state
//! - `Down`/`Up`: Move the cursor
//! - `Esc`: Clear the search and leave search mode

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;
use zellij_tile::prelude::*;

use tickbox::app::REMOVAL_GRACE_PERIOD;
use tickbox::notify::{Listeners, TimerToken, SEARCH_INPUT_DELAY};
use tickbox::{handle_event, Action, Checklist, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `Checklist` with Zellij-specific timer bookkeeping.
#[derive(Default)]
struct State {
    /// Core checklist; `None` until `load` succeeds.
    app: Option<Checklist>,

    /// Configuration error shown instead of the checklist.
    load_error: Option<String>,

    /// Tokens of search-delay timers, oldest first.
    search_timers: VecDeque<TimerToken>,

    /// Keys waiting for their removal grace period, oldest first.
    removal_timers: VecDeque<String>,
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes tracing, creates the checklist and
    /// subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        tickbox::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(states = ?config.states, select_mode = ?config.select_mode, "parsed configuration");

        match tickbox::initialize_with_listeners(&config, Self::host_listeners()) {
            Ok(app) => {
                tracing::debug!(items = app.size(), "checklist initialized");
                self.app = Some(app);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize checklist");
                self.load_error = Some(e.to_string());
            }
        }

        subscribe(&[EventType::Key, EventType::Timer]);
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(elapsed) => match self.map_timer_event(elapsed) {
                Some(event) => event,
                None => return false,
            },
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    /// Handles `zellij pipe` messages carrying item updates.
    ///
    /// CLI pipes stay blocked until the plugin answers, so they are always
    /// unblocked once the message was handled.
    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        let payload = pipe_message.payload.clone().unwrap_or_default();
        tracing::debug!(name = %pipe_message.name, payload_len = payload.len(), "pipe message");

        let should_render = match Event::from_message(&pipe_message.name, &payload) {
            Some(event) => self.dispatch(&event),
            None => false,
        };

        if let PipeSource::Cli(_) = pipe_message.source {
            unblock_cli_pipe_input(&pipe_message.name);
        }
        should_render
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        match &self.app {
            Some(app) => print!("{}", tickbox::ui::render(app, rows, cols)),
            None => {
                let message = self.load_error.as_deref().unwrap_or("tickbox is not initialized");
                println!("tickbox: {message}");
            }
        }
    }
}

impl State {
    /// Listeners that report selection changes to the log.
    fn host_listeners() -> Listeners {
        Listeners::new()
            .on_select(|_, key, item| tracing::info!(key = %key, value = %item.value, "item selected"))
            .on_deselect(|_, key, _| tracing::info!(key = %key, "item deselected"))
            .on_select_group(|_, group, items| tracing::info!(group = %group, count = items.len(), "group selected"))
            .on_deselect_group(|_, group, _| tracing::info!(group = %group, "group deselected"))
            .on_select_all(|_, items| tracing::info!(count = items.len(), "visible items selected"))
            .on_deselect_all(|_, items| tracing::info!(count = items.len(), "visible items deselected"))
            .on_search_input_delay(|query, selected| {
                tracing::debug!(query = %query, selected = selected.len(), "search settled");
            })
    }

    fn dispatch(&mut self, event: &Event) -> bool {
        let Some(app) = self.app.as_mut() else {
            return false;
        };

        match handle_event(app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn input_mode(&self) -> InputMode {
        self.app.as_ref().map(|app| app.input_mode).unwrap_or_default()
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CursorDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CursorUp);
        }

        match self.input_mode() {
            InputMode::Search => Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::ToggleVisibleItems {
                    alternate: key.has_modifiers(&[KeyModifier::Shift]),
                },
                BareKey::Down => Event::CursorDown,
                BareKey::Up => Event::CursorUp,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::CursorDown,
                BareKey::Up | BareKey::Char('k') => Event::CursorUp,
                BareKey::Enter | BareKey::Char(' ') => Event::ToggleAtCursor,
                BareKey::Char('g') => Event::ToggleGroupAtCursor,
                BareKey::Char('a') => Event::ToggleAllVisible,
                BareKey::Char('c') => Event::CollapseAtCursor,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Esc | BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    /// Pops the oldest token of the timer kind matching `elapsed` seconds.
    fn map_timer_event(&mut self, elapsed: f64) -> Option<Event> {
        let is_search = (elapsed - SEARCH_INPUT_DELAY.as_secs_f64()).abs()
            < (elapsed - REMOVAL_GRACE_PERIOD.as_secs_f64()).abs();

        if is_search {
            self.search_timers.pop_front().map(Event::TimerElapsed)
        } else {
            self.removal_timers
                .pop_front()
                .map(|key| Event::CommitRemoval { key })
        }
    }

    fn start_timer(delay: Duration) {
        set_timeout(delay.as_secs_f64());
    }

    /// Executes an action returned from event handling.
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::ShowStatus(text) => tracing::trace!(text = %text, "status shown"),
            Action::HideStatus => tracing::trace!("status hidden"),
            Action::ScheduleTimer { token, delay } => {
                self.search_timers.push_back(*token);
                Self::start_timer(*delay);
            }
            Action::CancelTimer { token } => {
                tracing::trace!(token = token.0, "timer superseded; it will elapse as stale");
            }
            Action::ScheduleRemoval { key, delay } => {
                self.removal_timers.push_back(key.clone());
                Self::start_timer(*delay);
            }
        }
    }
}
