//! Input mode state for the application.
//!
//! The mode decides how keystrokes are interpreted by a keyboard host:
//! - **Normal**: navigation and toggling keybindings are active
//! - **Search**: printable keys edit the search query
//!
//! # Example
//!
//! ```rust
//! use tickbox::app::InputMode;
//!
//! let mode = InputMode::default();
//! assert_eq!(mode, InputMode::Normal);
//! ```

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
/// Determines the displayed footer text and whether the search bar has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation and toggling mode.
    ///
    /// Available keybindings: j/k (navigate), space (toggle), g (toggle group),
    /// c (collapse group), a (select all visible), / (search), q (quit).
    #[default]
    Normal,

    /// Search input has focus.
    ///
    /// Characters extend the query, Enter toggles every visible item,
    /// Shift+Enter toggles toward the alternate state, Esc clears and leaves.
    Search,
}
