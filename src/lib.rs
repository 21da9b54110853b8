//! Tickbox: a searchable, groupable, multi-state checklist engine.
//!
//! Tickbox keeps a keyed set of items, each holding one value from a
//! configurable state cycle, and provides:
//! - Per-item, per-group and "all visible" state cycling
//! - Single-select and multi-select modes; user toggles and bulk operations skip
//!   disabled items
//! - Case-insensitive substring filtering over labels and group names
//! - Optional listeners for every selection, collapse and search event
//! - A debounced search hook driven by host timers
//! - A view model and an ANSI renderer, hosted as a Zellij plugin
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Engines       │   │ Notify        │
//! │ (ui/)         │   │ (engine/)     │   │ (notify/)     │
//! │ - Rendering   │   │ - State cycle │   │ - Listeners   │
//! │ - Theming     │   │ - Filter      │   │ - Debounce    │
//! │ - Components  │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Store & Domain Layers                              │
//! │  - Item container, field mapping (store/)           │
//! │  - Items, state sets, errors (domain/)              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Checklist state with the event/action model
//! - [`domain`]: Core domain types (items, state values, errors)
//! - [`store`]: Item container and record field mapping
//! - [`engine`]: State cycling and filtering
//! - [`notify`]: Listener registry and search debounce
//! - [`ui`]: View model, terminal rendering, themes
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! As a Zellij plugin:
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/tickbox.wasm" {
//!         states "0,1,2"
//!         select_mode "multiple"
//!         items "[{\"id\": 1, \"label\": \"Apple\", \"optgroup\": \"Fruit\"}]"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! Or from TOML with [`Config::from_toml_str`] / [`Config::from_file`].
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tickbox::notify::Listeners;
//! use tickbox::{handle_event, initialize_with_listeners, Config, Event};
//!
//! let listeners = Listeners::new().on_select(|_store, key, _item| println!("selected {key}"));
//! let mut checklist = initialize_with_listeners(&Config::default(), listeners)?;
//!
//! let events = vec![
//!     Event::AddItems(json!([{"id": "a", "label": "Apple"}, {"id": "b", "label": "Banana"}])),
//!     Event::ToggleItem { key: "a".to_string() },
//! ];
//! for event in &events {
//!     let (_render, _actions) = handle_event(&mut checklist, event)?;
//!     // Execute actions...
//! }
//! assert_eq!(checklist.selected_keys(), vec!["a"]);
//! # Ok::<(), tickbox::TickboxError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod engine;
pub mod notify;
pub mod store;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Checklist, Event, InputMode};
pub use domain::{Item, Result, SelectMode, StateSet, StateValue, TickboxError};
pub use notify::Listeners;
pub use store::FieldMap;
pub use ui::Theme;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use store::RecordMapper;

/// Checklist configuration.
///
/// Every field has a default, so partial TOML documents and partial Zellij
/// configuration maps are accepted.
///
/// # Example
///
/// ```rust
/// use tickbox::{Config, SelectMode};
///
/// let config = Config::from_toml_str(r#"
///     states = [0, 1, 2]
///     select_mode = "single"
///
///     [field_map]
///     key_field = "code"
/// "#)?;
/// assert_eq!(config.select_mode, SelectMode::Single);
/// assert_eq!(config.field_map.key_field, "code");
/// assert_eq!(config.field_map.label_field, "label");
/// # Ok::<(), tickbox::TickboxError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered state cycle. The first value means "unselected". Default: `[0, 1]`
    pub states: Vec<i64>,

    /// Default: multiple.
    pub select_mode: SelectMode,

    /// Advisory selection size limit; exceeding it only logs a warning.
    ///
    /// Default: 1000
    pub max_selectable_items: usize,

    /// Record field names. See [`FieldMap`].
    pub field_map: FieldMap,

    /// Group assigned to items without one. Default: `"Default"`
    pub default_group_text: String,
    pub search_placeholder: String,
    pub select_all_main_text: String,
    pub select_all_group_text: String,
    pub clear_search_tooltip: String,
    /// Status text for an empty list or an empty search result.
    pub empty_text: String,
    /// Tooltip of disabled items.
    pub disabled_text: String,

    /// Remember values of removed items and reapply them on re-add.
    pub keep_removed_states: bool,

    /// Initial records, loaded in order at construction.
    pub items: Vec<Value>,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    #[serde(alias = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            states: vec![0, 1],
            select_mode: SelectMode::Multiple,
            max_selectable_items: 1000,
            field_map: FieldMap::default(),
            default_group_text: "Default".to_string(),
            search_placeholder: "Search options...".to_string(),
            select_all_main_text: "Select All Visible".to_string(),
            select_all_group_text: "Select All".to_string(),
            clear_search_tooltip: "Clear Search".to_string(),
            empty_text: "No items available".to_string(),
            disabled_text: "This item is disabled".to_string(),
            keep_removed_states: false,
            items: Vec::new(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `states`: Comma-separated integers (falls back to the default if any fails)
    /// - `select_mode`: `single` or `multiple`
    /// - `max_selectable_items`: Integer (falls back to 1000 on parse error)
    /// - `key_field`, `label_field`, `value_field`, `group_field`
    ///   (or `optgroup_field`), `disabled_field`: Field names
    /// - `keep_removed_states`: `true` or `false`
    /// - `items`: JSON array of records (ignored with a warning if invalid)
    /// - Text options, `theme`, `theme_file`, `trace_level`: Strings
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use tickbox::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("states".to_string(), "0, 1, 2".to_string());
    /// map.insert("max_selectable_items".to_string(), "nope".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.states, vec![0, 1, 2]);
    /// assert_eq!(config.max_selectable_items, 1000);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let states = config
            .get("states")
            .and_then(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::parse::<i64>)
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .ok()
            })
            .unwrap_or_else(|| defaults.states.clone());

        let select_mode = config
            .get("select_mode")
            .and_then(|s| s.parse::<SelectMode>().ok())
            .unwrap_or(defaults.select_mode);

        let max_selectable_items = config
            .get("max_selectable_items")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.max_selectable_items);

        let keep_removed_states = config
            .get("keep_removed_states")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(defaults.keep_removed_states);

        let field = |name: &str, fallback: &str| {
            config
                .get(name)
                .map_or_else(|| fallback.to_string(), |s| s.trim().to_string())
        };
        let field_map = FieldMap {
            key_field: field("key_field", &defaults.field_map.key_field),
            label_field: field("label_field", &defaults.field_map.label_field),
            value_field: field("value_field", &defaults.field_map.value_field),
            group_field: config
                .get("group_field")
                .or_else(|| config.get("optgroup_field"))
                .map_or_else(|| defaults.field_map.group_field.clone(), |s| s.trim().to_string()),
            disabled_field: field("disabled_field", &defaults.field_map.disabled_field),
        };

        let items = config.get("items").map_or_else(Vec::new, |raw| {
            serde_json::from_str::<Vec<Value>>(raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring invalid items configuration");
                Vec::new()
            })
        });

        let text = |name: &str, fallback: &String| config.get(name).cloned().unwrap_or_else(|| fallback.clone());

        Self {
            states,
            select_mode,
            max_selectable_items,
            field_map,
            default_group_text: text("default_group_text", &defaults.default_group_text),
            search_placeholder: text("search_placeholder", &defaults.search_placeholder),
            select_all_main_text: text("select_all_main_text", &defaults.select_all_main_text),
            select_all_group_text: text("select_all_group_text", &defaults.select_all_group_text),
            clear_search_tooltip: text("clear_search_tooltip", &defaults.clear_search_tooltip),
            empty_text: text("empty_text", &defaults.empty_text),
            disabled_text: text("disabled_text", &defaults.disabled_text),
            keep_removed_states,
            items,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`TickboxError::Toml`] for malformed documents and
    /// [`TickboxError::Config`] if the result fails [`Config::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`TickboxError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks the state list and the field map.
    ///
    /// # Errors
    ///
    /// Returns [`TickboxError::Config`] for fewer than two states, duplicate
    /// states, or empty or clashing field names.
    pub fn validate(&self) -> Result<()> {
        StateSet::new(self.states.iter().copied())?;
        RecordMapper::new(&self.field_map)?;
        Ok(())
    }

    /// Resolves the configured theme: file, then name, then the default.
    ///
    /// Load failures are logged and fall back to the default theme.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(theme_file).unwrap_or_else(|e| {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Creates a checklist without listeners.
///
/// # Errors
///
/// Returns [`TickboxError::Config`] for an invalid configuration and
/// [`TickboxError::InvalidItems`] if the initial items cannot be loaded.
///
/// # Example
///
/// ```rust
/// use tickbox::{initialize, Config};
///
/// let checklist = initialize(&Config::default())?;
/// assert_eq!(checklist.size(), 0);
/// # Ok::<(), tickbox::TickboxError>(())
/// ```
pub fn initialize(config: &Config) -> Result<Checklist> {
    initialize_with_listeners(config, Listeners::new())
}

/// Creates a checklist with the given listeners.
///
/// # Errors
///
/// As [`initialize`].
pub fn initialize_with_listeners(config: &Config, listeners: Listeners) -> Result<Checklist> {
    tracing::debug!(
        states = ?config.states,
        select_mode = ?config.select_mode,
        initial_items = config.items.len(),
        "initializing checklist"
    );

    Checklist::new(config, listeners, config.resolve_theme())
}
