// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Front-end settings snapshot.
//!
//! [`Settings`] is loaded once from TOML and handed to the
//! [`Window`](crate::window::Window), which threads it into every
//! [`RenderContext`](crate::render::RenderContext). Nothing reads settings
//! through a global.
//!
//! ```toml
//! screen_width = 1920
//! screen_height = 1080
//! debug_text = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors produced while loading [`Settings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings text is not valid TOML for [`Settings`].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Immutable configuration consulted by rendering and the frame loop.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen width in pixels; theme coordinates of root components are
    /// fractions of this.
    pub screen_width: u32,
    /// Screen height in pixels.
    pub screen_height: u32,
    /// Draw text bounding boxes.
    pub debug_text: bool,
    /// Draw component bounds for every rendered component.
    pub debug_grid: bool,
    /// Whether the window collects help prompts from the top GUI.
    pub show_help_prompts: bool,
    /// Upper bound for a single frame's update delta.
    pub max_frame_delta_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            debug_text: false,
            debug_grid: false,
            show_help_prompts: true,
            max_frame_delta_ms: 100,
        }
    }
}

impl Settings {
    /// Parses settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        log::debug!(
            "loaded settings from {}: {}x{}",
            path.display(),
            settings.screen_width,
            settings.screen_height
        );
        Ok(settings)
    }

    /// Returns the screen size as a [`kurbo::Size`].
    #[must_use]
    pub fn screen_size(&self) -> kurbo::Size {
        kurbo::Size::new(f64::from(self.screen_width), f64::from(self.screen_height))
    }
}
