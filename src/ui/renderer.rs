//! Top-level rendering coordinator.
//!
//! A [`Renderer`] consumes a [`ChecklistViewModel`]. The bundled
//! [`AnsiRenderer`] draws it as an ANSI-styled terminal frame; other hosts can
//! implement the trait to draw the same view model with their own toolkit.
//!
//! # Example
//!
//! ```rust
//! use tickbox::ui::render;
//! use tickbox::{initialize, Config};
//!
//! let checklist = initialize(&Config::default())?;
//! let frame = render(&checklist, 24, 80);
//! assert!(frame.contains("No items available"));
//! # Ok::<(), tickbox::TickboxError>(())
//! ```

use crate::app::Checklist;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChecklistViewModel;

/// Draws view models.
pub trait Renderer {
    fn draw(&mut self, vm: &ChecklistViewModel);
}

/// Renders into an in-memory ANSI frame buffer.
#[derive(Debug)]
pub struct AnsiRenderer<'a> {
    theme: &'a Theme,
    rows: usize,
    cols: usize,
    frame: String,
}

impl<'a> AnsiRenderer<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme, rows: usize, cols: usize) -> Self {
        Self {
            theme,
            rows,
            cols,
            frame: String::new(),
        }
    }

    /// The last drawn frame.
    #[must_use]
    pub fn frame(&self) -> &str {
        &self.frame
    }

    #[must_use]
    pub fn into_frame(self) -> String {
        self.frame
    }
}

impl Renderer for AnsiRenderer<'_> {
    fn draw(&mut self, vm: &ChecklistViewModel) {
        self.frame.clear();
        components::render_checklist(&mut self.frame, vm, self.theme, self.cols, self.rows);
    }
}

/// Renders the checklist to an ANSI frame for a `rows` × `cols` viewport.
///
/// The caller prints the frame; nothing is written to stdout here.
#[must_use]
pub fn render(state: &Checklist, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);

    let mut renderer = AnsiRenderer::new(&state.theme, rows, cols);
    renderer.draw(&viewmodel);
    renderer.into_frame()
}
