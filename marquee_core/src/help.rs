// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Help bar styling.

use kurbo::{Size, Vec2};

use crate::theme::ThemeData;

/// Placement, colors and font of the help-prompt bar.
#[derive(Clone, Debug, PartialEq)]
pub struct HelpStyle {
    /// Top-left of the bar, in pixels.
    pub position: Vec2,
    /// Icon tint, `0xRRGGBBAA`.
    pub icon_color: u32,
    /// Text color, `0xRRGGBBAA`.
    pub text_color: u32,
    /// Font file, or `None` for the default font.
    pub font_path: Option<String>,
    screen_size: Size,
}

impl HelpStyle {
    /// Default style for a screen of `screen_size`: bottom-left, grey.
    #[must_use]
    pub fn new(screen_size: Size) -> Self {
        Self {
            position: Vec2::new(screen_size.width * 0.012, screen_size.height * 0.9515),
            icon_color: 0x7777_77FF,
            text_color: 0x7777_77FF,
            font_path: None,
            screen_size,
        }
    }

    /// Overrides the style from the `help` element (type `helpsystem`) of
    /// `view`. Positions are normalized to the screen size.
    pub fn apply_theme(&mut self, theme: &ThemeData, view: &str) {
        let Some(elem) = theme.get_element(view, "help", "helpsystem") else {
            return;
        };
        if let Some(pos) = elem.get_pair("pos") {
            self.position =
                Vec2::new(pos.x * self.screen_size.width, pos.y * self.screen_size.height);
        }
        if let Some(color) = elem.get_color("textColor") {
            self.text_color = color;
        }
        if let Some(color) = elem.get_color("iconColor") {
            self.icon_color = color;
        }
        if let Some(path) = elem.get_str("fontPath") {
            self.font_path = Some(path.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sit_bottom_left() {
        let style = HelpStyle::new(Size::new(1000.0, 1000.0));
        assert!((style.position.x - 12.0).abs() < 1e-9, "x: {}", style.position.x);
        assert!((style.position.y - 951.5).abs() < 1e-9, "y: {}", style.position.y);
        assert_eq!(style.text_color, 0x7777_77FF);
        assert_eq!(style.font_path, None);
    }

    #[test]
    fn theme_overrides() {
        let theme = ThemeData::from_toml_str(
            r#"
[views.system.help]
type = "helpsystem"
pos = [0.5, 0.25]
textColor = "FFFFFF"
iconColor = "00000080"
fontPath = "fonts/help.ttf"
"#,
        )
        .unwrap();
        let mut style = HelpStyle::new(Size::new(800.0, 400.0));
        style.apply_theme(&theme, "system");
        assert_eq!(style.position, Vec2::new(400.0, 100.0));
        assert_eq!(style.text_color, 0xFFFF_FFFF);
        assert_eq!(style.icon_color, 0x0000_0080);
        assert_eq!(style.font_path.as_deref(), Some("fonts/help.ttf"));

        let before = style.clone();
        style.apply_theme(&theme, "basic");
        assert_eq!(style, before, "missing view leaves the style alone");
    }
}
