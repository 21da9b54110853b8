//! User interface rendering layer with component-based architecture.
//!
//! This module turns view models into ANSI-styled frames through composable
//! rendering components, with TOML theme support and query highlighting.
//!
//! # Architecture
//!
//! ```text
//! Checklist → compute_viewmodel → ChecklistViewModel → Renderer → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: The [`Renderer`] trait and the ANSI implementation
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, check marks)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, AnsiRenderer, Renderer};
pub use theme::Theme;
pub use viewmodel::{
    ChecklistViewModel, CheckMark, DisplayRow, EmptyState, FooterInfo, GroupRow, HeaderInfo, ItemRow,
    SearchBarInfo,
};
