// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-component specialization.
//!
//! The tree stores layout, opacity, topology and animation slots for every
//! component. What a component *is* (a text label, an image, a plain group)
//! lives in its [`Behavior`]. Every method has a default, so a grouping node
//! implements nothing at all (see [`Container`]).

use core::any::Any;
use core::fmt;

use crate::render::RenderContext;
use crate::theme::{ThemeData, ThemeFlags};
use crate::transform::Transform3d;

use super::layout::Layout;

/// A button/action pair shown in the help bar, e.g. `("a", "select")`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HelpPrompt {
    /// Input name (`a`, `b`, `up/down`, ...).
    pub button: String,
    /// What the input does.
    pub action: String,
}

impl HelpPrompt {
    /// Creates a prompt.
    #[must_use]
    pub fn new(button: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            button: button.into(),
            action: action.into(),
        }
    }
}

/// Capabilities a component can specialize.
///
/// Layout hooks run after the tree has committed the new layout value.
/// [`render`](Self::render) receives the component's composed transform; the
/// tree renders children afterwards, in draw order.
pub trait Behavior: Any + fmt::Debug {
    /// Advances behavior-specific state. Animations are advanced by the tree.
    fn update(&mut self, delta_ms: u32) {
        _ = delta_ms;
    }

    /// Draws the component itself.
    fn render(&self, layout: &Layout, transform: &Transform3d, cx: &mut RenderContext<'_>) {
        _ = (layout, transform, cx);
    }

    /// Reads behavior-specific theme properties. The tree has already applied
    /// the layout properties.
    fn apply_theme(&mut self, theme: &ThemeData, view: &str, element: &str, flags: ThemeFlags) {
        _ = (theme, view, element, flags);
    }

    /// Called after the position changed.
    fn on_position_changed(&mut self, layout: &Layout) {
        _ = layout;
    }

    /// Called after the origin changed.
    fn on_origin_changed(&mut self, layout: &Layout) {
        _ = layout;
    }

    /// Called after the size changed.
    fn on_size_changed(&mut self, layout: &Layout) {
        _ = layout;
    }

    /// Derives behavior state from the component's 0–255 opacity.
    fn set_opacity(&mut self, opacity: u8) {
        _ = opacity;
    }

    /// Returns the component's editable value.
    fn value(&self) -> String {
        String::new()
    }

    /// Sets the component's editable value.
    fn set_value(&mut self, value: &str) {
        _ = value;
    }

    /// Returns the help prompts this component contributes.
    fn help_prompts(&self) -> Vec<HelpPrompt> {
        Vec::new()
    }

    /// Called when the component becomes visible.
    fn on_show(&mut self) {}

    /// Called when the component is hidden.
    fn on_hide(&mut self) {}
}

/// A grouping component with no drawing of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct Container;

impl Behavior for Container {}
