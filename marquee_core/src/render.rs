// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing contract for rendering backends.
//!
//! The component tree never talks to a graphics API. Component behaviors
//! issue immediate-mode draw calls against a [`Renderer`] during
//! [`ComponentTree::render`](crate::component::ComponentTree::render), and
//! backends that keep retained state can additionally consume the
//! per-frame [`FrameChanges`] in [`Renderer::apply`].
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(now: HostTime) {
//!     let delta = clock.tick(now);
//!
//!     // Update: advance animations, run behavior updates
//!     tree.update(gui, delta);
//!
//!     // Evaluate: drain dirty channels
//!     let changes = tree.evaluate();
//!     renderer.apply(&tree, &changes);
//!
//!     // Render: walk the tree in draw order
//!     let mut cx = RenderContext::new(&mut renderer, &settings);
//!     tree.render(gui, &Transform3d::IDENTITY, &mut cx);
//! }
//! ```
//!
//! [`Window::frame`](crate::window::Window::frame) does all of this.

use kurbo::Rect;

use crate::component::{ComponentTree, FrameChanges};
use crate::settings::Settings;
use crate::transform::Transform3d;

/// Horizontal text alignment within a component's box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

impl Alignment {
    /// Parses a theme alignment string.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Immediate-mode drawing backend.
///
/// Colors are `0xRRGGBBAA`. Coordinates passed to the draw methods are in the
/// space established by the last [`set_matrix`](Self::set_matrix) call.
pub trait Renderer {
    /// Sets the model matrix for subsequent draw calls.
    fn set_matrix(&mut self, transform: &Transform3d);

    /// Fills a rectangle.
    fn draw_rect(&mut self, rect: Rect, color: u32);

    /// Draws a block of text inside `bounds`.
    fn draw_text(
        &mut self,
        text: &str,
        bounds: Rect,
        color: u32,
        alignment: Alignment,
        line_spacing: f64,
    );

    /// Applies per-frame changes to retained backend state, reading current
    /// values from `tree` as needed.
    ///
    /// The default implementation ignores the changes, which suits purely
    /// immediate-mode backends.
    fn apply(&mut self, tree: &ComponentTree, changes: &FrameChanges) {
        _ = (tree, changes);
    }
}

/// Everything a behavior needs while drawing.
pub struct RenderContext<'a> {
    /// The active backend.
    pub renderer: &'a mut dyn Renderer,
    /// Current settings snapshot.
    pub settings: &'a Settings,
}

impl core::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderContext")
            .field("settings", self.settings)
            .finish_non_exhaustive()
    }
}

impl<'a> RenderContext<'a> {
    /// Bundles a renderer and settings.
    #[must_use]
    pub fn new(renderer: &'a mut dyn Renderer, settings: &'a Settings) -> Self {
        Self { renderer, settings }
    }
}

// ---------------------------------------------------------------------------
// Recording renderer
// ---------------------------------------------------------------------------

/// One call received by a [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Renderer::set_matrix`].
    SetMatrix(Transform3d),
    /// [`Renderer::draw_rect`].
    Rect {
        /// Filled rectangle.
        rect: Rect,
        /// Fill color.
        color: u32,
    },
    /// [`Renderer::draw_text`].
    Text {
        /// Text drawn.
        text: String,
        /// Layout box.
        bounds: Rect,
        /// Text color.
        color: u32,
        /// Alignment within `bounds`.
        alignment: Alignment,
    },
}

/// A [`Renderer`] that records every call, for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    /// Calls in the order received.
    pub commands: Vec<DrawCommand>,
    /// Number of [`Renderer::apply`] calls that carried changes.
    pub applied_frames: u32,
}

impl RecordingRenderer {
    /// Returns the text of every draw-text call, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Discards recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn set_matrix(&mut self, transform: &Transform3d) {
        self.commands.push(DrawCommand::SetMatrix(*transform));
    }

    fn draw_rect(&mut self, rect: Rect, color: u32) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_text(
        &mut self,
        text: &str,
        bounds: Rect,
        color: u32,
        alignment: Alignment,
        _line_spacing: f64,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            bounds,
            color,
            alignment,
        });
    }

    fn apply(&mut self, _tree: &ComponentTree, changes: &FrameChanges) {
        if !changes.is_empty() {
            self.applied_frames += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_names() {
        assert_eq!(Alignment::from_name("left"), Some(Alignment::Left));
        assert_eq!(Alignment::from_name("center"), Some(Alignment::Center));
        assert_eq!(Alignment::from_name("right"), Some(Alignment::Right));
        assert_eq!(Alignment::from_name("justify"), None);
    }

    #[test]
    fn recording_renderer_collects_texts() {
        let mut r = RecordingRenderer::default();
        r.set_matrix(&Transform3d::IDENTITY);
        r.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), 0xFF);
        r.draw_text("hello", Rect::ZERO, 0xFF, Alignment::Left, 1.5);
        assert_eq!(r.commands.len(), 3);
        assert_eq!(r.texts(), vec!["hello"]);
        r.clear();
        assert!(r.commands.is_empty());
    }
}
