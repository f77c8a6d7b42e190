// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Queryable theme description.
//!
//! A theme is a set of *views* (`system`, `basic`, `detailed`, ...), each
//! holding named *elements*. Every element has a `type` (`text`, `image`,
//! `helpsystem`, ...) and a bag of typed properties. Components look up their
//! element by `(view, element, type)` and read the properties they recognize;
//! anything missing is simply not applied.
//!
//! Themes are loaded from TOML:
//!
//! ```toml
//! [views.system.logoText]
//! type = "text"
//! pos = [0.5, 0.1]
//! size = [0.8, 0.1]
//! origin = [0.5, 0.0]
//! color = "FFFFFF"
//! alignment = "center"
//! ```

use std::collections::HashMap;
use std::ops::BitOr;
use std::path::{Path, PathBuf};

use kurbo::Vec2;
use serde::Deserialize;

/// Errors produced while loading a [`ThemeData`].
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme file could not be read.
    #[error("failed to read theme file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The theme text is not valid TOML, or has the wrong shape.
    #[error("failed to parse theme: {0}")]
    Parse(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// Property mask
// ---------------------------------------------------------------------------

/// Which groups of theme properties a component should apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ThemeFlags(u32);

impl ThemeFlags {
    /// No properties.
    pub const NONE: Self = Self(0);
    /// Image and asset paths.
    pub const PATH: Self = Self(1);
    /// `pos`.
    pub const POSITION: Self = Self(1 << 1);
    /// `size`.
    pub const SIZE: Self = Self(1 << 2);
    /// `origin`.
    pub const ORIGIN: Self = Self(1 << 3);
    /// `color` and `backgroundColor`.
    pub const COLOR: Self = Self(1 << 4);
    /// `fontPath`.
    pub const FONT_PATH: Self = Self(1 << 5);
    /// `fontSize`.
    pub const FONT_SIZE: Self = Self(1 << 6);
    /// Navigation sounds.
    pub const SOUND: Self = Self(1 << 7);
    /// `alignment`.
    pub const ALIGNMENT: Self = Self(1 << 8);
    /// `text`.
    pub const TEXT: Self = Self(1 << 9);
    /// `forceUppercase`.
    pub const FORCE_UPPERCASE: Self = Self(1 << 10);
    /// `lineSpacing`.
    pub const LINE_SPACING: Self = Self(1 << 11);
    /// Animation delays.
    pub const DELAY: Self = Self(1 << 12);
    /// `zIndex`.
    pub const Z_INDEX: Self = Self(1 << 13);
    /// `rotation` and `rotationOrigin`.
    pub const ROTATION: Self = Self(1 << 14);
    /// Every property.
    pub const ALL: Self = Self(u32::MAX);

    /// Returns the raw bit pattern.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns whether every bit of `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ThemeFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

/// A single theme property value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ThemeValue {
    /// `true` / `false`.
    Bool(bool),
    /// A scalar (`lineSpacing`, `zIndex`, `rotation`, ...).
    Number(f64),
    /// A normalized pair (`pos`, `size`, `origin`, ...).
    Pair([f64; 2]),
    /// A string (`text`, `alignment`, paths, hex colors).
    Text(String),
}

/// One themed element: its type plus its properties.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ThemeElement {
    /// Element type, e.g. `text` or `helpsystem`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Properties keyed by name.
    #[serde(flatten)]
    pub properties: HashMap<String, ThemeValue>,
}

impl ThemeElement {
    /// Returns whether `prop` is present.
    #[must_use]
    pub fn has(&self, prop: &str) -> bool {
        self.properties.contains_key(prop)
    }

    /// Reads a normalized pair.
    #[must_use]
    pub fn get_pair(&self, prop: &str) -> Option<Vec2> {
        match self.properties.get(prop)? {
            ThemeValue::Pair([x, y]) => Some(Vec2::new(*x, *y)),
            _ => None,
        }
    }

    /// Reads a scalar.
    #[must_use]
    pub fn get_float(&self, prop: &str) -> Option<f64> {
        match self.properties.get(prop)? {
            ThemeValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Reads a string.
    #[must_use]
    pub fn get_str(&self, prop: &str) -> Option<&str> {
        match self.properties.get(prop)? {
            ThemeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Reads a boolean.
    #[must_use]
    pub fn get_bool(&self, prop: &str) -> Option<bool> {
        match self.properties.get(prop)? {
            ThemeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Reads an `RRGGBB` or `RRGGBBAA` hex color as `0xRRGGBBAA`.
    ///
    /// Six-digit colors are fully opaque.
    #[must_use]
    pub fn get_color(&self, prop: &str) -> Option<u32> {
        let text = self.get_str(prop)?;
        let color = parse_color(text);
        if color.is_none() {
            log::warn!("invalid color {text:?} for property {prop:?}");
        }
        color
    }
}

/// Parses `RRGGBB` / `RRGGBBAA` (optionally `#`-prefixed) into `0xRRGGBBAA`.
#[must_use]
pub fn parse_color(text: &str) -> Option<u32> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    match hex.len() {
        6 => Some((value << 8) | 0xFF),
        8 => Some(value),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// ThemeData
// ---------------------------------------------------------------------------

/// A loaded theme: views of named elements.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ThemeData {
    /// Views keyed by name, each a map of element name to element.
    #[serde(default)]
    pub views: HashMap<String, HashMap<String, ThemeElement>>,
}

impl ThemeData {
    /// Parses a theme from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ThemeError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a theme file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let theme = Self::from_toml_str(&text)?;
        log::debug!("loaded theme {} ({} views)", path.display(), theme.views.len());
        Ok(theme)
    }

    /// Looks up an element by view and name.
    ///
    /// Returns `None` when the view or element is absent, or when the element
    /// exists with a type other than `expected_type`. An empty
    /// `expected_type` accepts any type.
    #[must_use]
    pub fn get_element(
        &self,
        view: &str,
        element: &str,
        expected_type: &str,
    ) -> Option<&ThemeElement> {
        let elem = self.views.get(view)?.get(element)?;
        if !expected_type.is_empty() && elem.kind != expected_type {
            log::warn!(
                "requested mismatched theme type for [{view}.{element}]: \
                 expected {expected_type:?}, got {:?}",
                elem.kind
            );
            return None;
        }
        Some(elem)
    }

    /// Returns whether the theme defines `view`.
    #[must_use]
    pub fn has_view(&self, view: &str) -> bool {
        self.views.contains_key(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME: &str = r#"
[views.system.logoText]
type = "text"
pos = [0.5, 0.1]
size = [1, 0]
color = "FF0000"
backgroundColor = "00000080"
forceUppercase = true
lineSpacing = 2
alignment = "center"

[views.system.help]
type = "helpsystem"
pos = [0.01, 0.95]
"#;

    #[test]
    fn typed_lookup() {
        let theme = ThemeData::from_toml_str(THEME).unwrap();
        let elem = theme.get_element("system", "logoText", "text").unwrap();
        assert_eq!(elem.get_pair("pos"), Some(Vec2::new(0.5, 0.1)));
        assert_eq!(elem.get_pair("size"), Some(Vec2::new(1.0, 0.0)), "integers widen");
        assert_eq!(elem.get_float("lineSpacing"), Some(2.0));
        assert_eq!(elem.get_bool("forceUppercase"), Some(true));
        assert_eq!(elem.get_str("alignment"), Some("center"));
        assert!(elem.has("color"));
        assert!(!elem.has("text"));
    }

    #[test]
    fn colors() {
        let theme = ThemeData::from_toml_str(THEME).unwrap();
        let elem = theme.get_element("system", "logoText", "text").unwrap();
        assert_eq!(elem.get_color("color"), Some(0xFF00_00FF), "six digits are opaque");
        assert_eq!(elem.get_color("backgroundColor"), Some(0x0000_0080));
        assert_eq!(parse_color("#123456"), Some(0x1234_56FF));
        assert_eq!(parse_color("12345"), None);
        assert_eq!(parse_color("GGGGGG"), None);
    }

    #[test]
    fn absence_is_benign() {
        let theme = ThemeData::from_toml_str(THEME).unwrap();
        assert!(theme.get_element("basic", "logoText", "text").is_none());
        assert!(theme.get_element("system", "missing", "text").is_none());
        let elem = theme.get_element("system", "logoText", "").unwrap();
        assert_eq!(elem.get_pair("origin"), None);
        assert_eq!(elem.get_float("pos"), None, "wrong value type reads as absent");
    }

    #[test]
    fn type_mismatch_hides_element() {
        let theme = ThemeData::from_toml_str(THEME).unwrap();
        assert!(theme.get_element("system", "help", "text").is_none());
        assert!(theme.get_element("system", "help", "helpsystem").is_some());
    }

    #[test]
    fn flags_combine() {
        let flags = ThemeFlags::POSITION | ThemeFlags::SIZE;
        assert!(flags.contains(ThemeFlags::POSITION));
        assert!(!flags.contains(ThemeFlags::ORIGIN));
        assert!(ThemeFlags::ALL.contains(flags));
        assert_eq!(ThemeFlags::NONE.bits(), 0);
    }

    #[test]
    fn malformed_theme_is_an_error() {
        let err = ThemeData::from_toml_str("[views.system.x]\npos = [0.1, 0.2]\n").unwrap_err();
        assert!(matches!(err, ThemeError::Parse(_)), "missing type key: {err:?}");
    }
}
