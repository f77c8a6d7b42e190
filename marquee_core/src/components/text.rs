// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text label component.

use kurbo::Rect;

use crate::component::{Behavior, Layout};
use crate::render::{Alignment, RenderContext};
use crate::theme::{ThemeData, ThemeFlags};
use crate::transform::Transform3d;

/// Fill drawn behind text when `debug_text` is set.
const DEBUG_TEXT_COLOR: u32 = 0xFF00_0033;

/// A block of text drawn inside the component's box.
///
/// A zero width or height means "fit to the text" on that axis; the flags are
/// recomputed whenever the size changes and can be read with
/// [`auto_extent`](Self::auto_extent).
#[derive(Clone, Debug)]
pub struct TextComponent {
    text: String,
    color: u32,
    color_opacity: u8,
    bg_color: u32,
    bg_opacity: u8,
    render_background: bool,
    uppercase: bool,
    alignment: Alignment,
    line_spacing: f64,
    auto_extent: (bool, bool),
}

impl Default for TextComponent {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: 0x0000_00FF,
            color_opacity: 0xFF,
            bg_color: 0,
            bg_opacity: 0,
            render_background: false,
            uppercase: false,
            alignment: Alignment::Left,
            line_spacing: 1.5,
            auto_extent: (true, true),
        }
    }
}

impl TextComponent {
    /// Creates a label showing `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Stored text, before any case conversion.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Text as drawn.
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.uppercase {
            self.text.to_uppercase()
        } else {
            self.text.clone()
        }
    }

    /// Current text color, `0xRRGGBBAA`.
    #[must_use]
    pub fn color(&self) -> u32 {
        self.color
    }

    /// Sets the text color. Its alpha becomes the base that opacity scales.
    pub fn set_color(&mut self, color: u32) {
        self.color = color;
        self.color_opacity = color.to_be_bytes()[3];
    }

    /// Current background color, `0xRRGGBBAA`.
    #[must_use]
    pub fn background_color(&self) -> u32 {
        self.bg_color
    }

    /// Sets the background color and enables background drawing.
    pub fn set_background_color(&mut self, color: u32) {
        self.bg_color = color;
        self.bg_opacity = color.to_be_bytes()[3];
        self.render_background = true;
    }

    /// Whether a background rectangle is drawn.
    #[must_use]
    pub fn renders_background(&self) -> bool {
        self.render_background
    }

    /// Enables or disables the background rectangle.
    pub fn set_render_background(&mut self, render: bool) {
        self.render_background = render;
    }

    /// Whether text is drawn upper-cased.
    #[must_use]
    pub fn is_uppercase(&self) -> bool {
        self.uppercase
    }

    /// Forces upper-case drawing.
    pub fn set_uppercase(&mut self, uppercase: bool) {
        self.uppercase = uppercase;
    }

    /// Horizontal alignment.
    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Sets the horizontal alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Line height as a multiple of the font height.
    #[must_use]
    pub fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    /// Sets the line spacing.
    pub fn set_line_spacing(&mut self, line_spacing: f64) {
        self.line_spacing = line_spacing;
    }

    /// Which axes fit the text: `(width, height)`.
    #[must_use]
    pub fn auto_extent(&self) -> (bool, bool) {
        self.auto_extent
    }
}

/// Replaces the alpha channel of `color` with `base` scaled by `opacity`.
fn scale_alpha(color: u32, base: u8, opacity: u8) -> u32 {
    let alpha = u32::from(base) * u32::from(opacity) / 255;
    (color & 0xFFFF_FF00) | alpha
}

impl Behavior for TextComponent {
    fn render(&self, layout: &Layout, transform: &Transform3d, cx: &mut RenderContext<'_>) {
        let bounds = Rect::from_origin_size((0.0, 0.0), layout.size);
        cx.renderer.set_matrix(transform);
        if self.render_background {
            cx.renderer.draw_rect(bounds, self.bg_color);
        }
        if cx.settings.debug_text {
            cx.renderer.draw_rect(bounds, DEBUG_TEXT_COLOR);
        }
        cx.renderer
            .draw_text(&self.display_text(), bounds, self.color, self.alignment, self.line_spacing);
    }

    fn apply_theme(&mut self, theme: &ThemeData, view: &str, element: &str, flags: ThemeFlags) {
        let Some(elem) = theme.get_element(view, element, "text") else {
            return;
        };

        if flags.contains(ThemeFlags::COLOR) {
            if let Some(color) = elem.get_color("color") {
                self.set_color(color);
            }
            self.render_background = false;
            if let Some(color) = elem.get_color("backgroundColor") {
                self.set_background_color(color);
            }
        }

        if flags.contains(ThemeFlags::ALIGNMENT)
            && let Some(name) = elem.get_str("alignment")
        {
            match Alignment::from_name(name) {
                Some(alignment) => self.alignment = alignment,
                None => log::error!("unknown text alignment {name:?} in [{view}.{element}]"),
            }
        }

        if flags.contains(ThemeFlags::TEXT)
            && let Some(text) = elem.get_str("text")
        {
            self.text = text.to_owned();
        }

        if flags.contains(ThemeFlags::FORCE_UPPERCASE)
            && let Some(uppercase) = elem.get_bool("forceUppercase")
        {
            self.uppercase = uppercase;
        }

        if flags.contains(ThemeFlags::LINE_SPACING)
            && let Some(spacing) = elem.get_float("lineSpacing")
        {
            self.line_spacing = spacing;
        }
    }

    fn on_size_changed(&mut self, layout: &Layout) {
        self.auto_extent = (layout.size.width == 0.0, layout.size.height == 0.0);
    }

    fn set_opacity(&mut self, opacity: u8) {
        self.color = scale_alpha(self.color, self.color_opacity, opacity);
        self.bg_color = scale_alpha(self.bg_color, self.bg_opacity, opacity);
    }

    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.text = value.to_owned();
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;
    use crate::component::ComponentTree;
    use crate::render::{DrawCommand, RecordingRenderer};
    use crate::settings::Settings;

    const THEME: &str = r#"
[views.system.title]
type = "text"
pos = [0.5, 0.1]
size = [0.5, 0]
color = "FF0000"
backgroundColor = "00000080"
forceUppercase = true
lineSpacing = 2
alignment = "center"
text = "Systems"

[views.system.badAlign]
type = "text"
alignment = "justified"

[views.system.image]
type = "image"
color = "00FF00"
"#;

    fn render_commands(
        tree: &ComponentTree,
        id: crate::component::ComponentId,
        settings: &Settings,
    ) -> Vec<DrawCommand> {
        let mut renderer = RecordingRenderer::default();
        let mut cx = RenderContext::new(&mut renderer, settings);
        tree.render(id, &Transform3d::IDENTITY, &mut cx);
        renderer.commands
    }

    #[test]
    fn theme_applies_text_properties() {
        let theme = ThemeData::from_toml_str(THEME).unwrap();
        let mut tree = ComponentTree::with_screen_size(Size::new(1000.0, 500.0));
        let id = tree.create(TextComponent::new("x"));
        tree.apply_theme(id, &theme, "system", "title", ThemeFlags::ALL);

        assert_eq!(tree.size(id), Size::new(500.0, 0.0));
        let text = tree.behavior::<TextComponent>(id).unwrap();
        assert_eq!(text.color(), 0xFF00_00FF);
        assert_eq!(text.background_color(), 0x0000_0080);
        assert!(text.renders_background());
        assert!(text.is_uppercase());
        assert_eq!(text.line_spacing(), 2.0);
        assert_eq!(text.alignment(), Alignment::Center);
        assert_eq!(text.text(), "Systems");
        assert_eq!(text.display_text(), "SYSTEMS");
        assert_eq!(text.auto_extent(), (false, true), "zero height fits the text");
    }

    #[test]
    fn theme_flags_limit_what_is_read() {
        let theme = ThemeData::from_toml_str(THEME).unwrap();
        let mut tree = ComponentTree::new();
        let id = tree.create(TextComponent::new("keep"));
        tree.apply_theme(id, &theme, "system", "title", ThemeFlags::POSITION | ThemeFlags::COLOR);

        let text = tree.behavior::<TextComponent>(id).unwrap();
        assert_eq!(text.color(), 0xFF00_00FF);
        assert_eq!(text.text(), "keep");
        assert!(!text.is_uppercase());
        assert_eq!(text.alignment(), Alignment::Left);
    }

    #[test]
    fn unknown_alignment_and_wrong_type_are_ignored() {
        let theme = ThemeData::from_toml_str(THEME).unwrap();
        let mut tree = ComponentTree::new();
        let id = tree.create(TextComponent::new("x"));
        tree.apply_theme(id, &theme, "system", "badAlign", ThemeFlags::ALL);
        tree.apply_theme(id, &theme, "system", "image", ThemeFlags::ALL);

        let text = tree.behavior::<TextComponent>(id).unwrap();
        assert_eq!(text.alignment(), Alignment::Left);
        assert_eq!(text.color(), 0x0000_00FF, "image element is not a text element");
    }

    #[test]
    fn opacity_scales_color_alpha() {
        let mut tree = ComponentTree::new();
        let mut label = TextComponent::new("x");
        label.set_color(0xFFFF_FF80);
        label.set_background_color(0x0000_00FF);
        let id = tree.create(label);

        tree.set_opacity(id, 0);
        let text = tree.behavior::<TextComponent>(id).unwrap();
        assert_eq!(text.color(), 0xFFFF_FF00);
        assert_eq!(text.background_color(), 0x0000_0000);

        tree.set_opacity(id, 255);
        let text = tree.behavior::<TextComponent>(id).unwrap();
        assert_eq!(text.color(), 0xFFFF_FF80, "base alpha restored");
        assert_eq!(text.background_color(), 0x0000_00FF);
    }

    #[test]
    fn value_is_the_text() {
        let mut tree = ComponentTree::new();
        let id = tree.create(TextComponent::new("a"));
        assert_eq!(tree.value(id), "a");
        tree.set_value(id, "b");
        assert_eq!(tree.behavior::<TextComponent>(id).unwrap().text(), "b");
    }

    #[test]
    fn renders_background_debug_and_text() {
        let mut tree = ComponentTree::new();
        let mut label = TextComponent::new("hello");
        label.set_background_color(0x1122_33FF);
        label.set_uppercase(true);
        let id = tree.create(label);
        tree.set_size(id, Size::new(100.0, 20.0));

        let settings = Settings {
            debug_text: true,
            ..Settings::default()
        };
        let commands = render_commands(&tree, id, &settings);
        let bounds = Rect::new(0.0, 0.0, 100.0, 20.0);
        assert_eq!(
            commands,
            vec![
                DrawCommand::SetMatrix(Transform3d::IDENTITY),
                DrawCommand::Rect { rect: bounds, color: 0x1122_33FF },
                DrawCommand::Rect { rect: bounds, color: DEBUG_TEXT_COLOR },
                DrawCommand::Text {
                    text: "HELLO".into(),
                    bounds,
                    color: 0x0000_00FF,
                    alignment: Alignment::Left,
                },
            ]
        );
    }
}
