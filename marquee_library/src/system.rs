// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Systems: configured collections of games and the loader that scans them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::SystemsError;
use crate::file_data::{FileId, FileTree, FileType, FileTypeMask};
use crate::platform::PlatformId;
use crate::sort::SortType;

/// What entries know about the system they belong to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemInfo {
    /// Short name, e.g. `snes`.
    pub name: String,
    /// Display name, e.g. `Super Nintendo`.
    pub full_name: String,
    /// Directory scanned for games.
    pub start_path: PathBuf,
    /// Accepted file extensions, with the leading dot.
    pub extensions: Vec<String>,
    /// Platforms the system emulates.
    pub platform_ids: Vec<PlatformId>,
}

impl SystemInfo {
    /// Creates a system with no extensions and no platforms.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        full_name: impl Into<String>,
        start_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            start_path: start_path.into(),
            extensions: Vec::new(),
            platform_ids: Vec::new(),
        }
    }

    /// Returns whether the system emulates `platform`.
    #[must_use]
    pub fn has_platform_id(&self, platform: PlatformId) -> bool {
        self.platform_ids.contains(&platform)
    }

    /// Whether file names are MAME short names (arcade and Neo Geo systems).
    #[must_use]
    pub fn is_arcade(&self) -> bool {
        self.has_platform_id(PlatformId::Arcade) || self.has_platform_id(PlatformId::NeoGeo)
    }

    /// Returns whether `path` has one of the system's extensions. Case is
    /// ignored.
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let ext = format!(".{}", ext.to_string_lossy()).to_lowercase();
        self.extensions.iter().any(|e| e.to_lowercase() == ext)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// One `[[system]]` table of a systems file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SystemConfig {
    /// Short name.
    pub name: String,
    /// Display name. Defaults to `name`.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Directory to scan.
    pub path: PathBuf,
    /// Accepted extensions, with the leading dot.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Platform names (see [`PlatformId::from_name`]).
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl SystemConfig {
    /// Resolves platform names. Unknown names are logged and skipped.
    #[must_use]
    pub fn to_info(&self) -> SystemInfo {
        let platform_ids = self
            .platforms
            .iter()
            .filter_map(|name| {
                let id = PlatformId::from_name(name);
                if id.is_none() {
                    log::warn!("unknown platform {name:?} for system {:?}", self.name);
                }
                id
            })
            .collect();
        SystemInfo {
            name: self.name.clone(),
            full_name: self.full_name.clone().unwrap_or_else(|| self.name.clone()),
            start_path: self.path.clone(),
            extensions: self.extensions.clone(),
            platform_ids,
        }
    }
}

/// A systems file: a list of `[[system]]` tables.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SystemsConfig {
    /// Configured systems, in file order.
    #[serde(default, rename = "system")]
    pub systems: Vec<SystemConfig>,
}

impl SystemsConfig {
    /// Parses a systems file from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SystemsError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a systems file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SystemsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SystemsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded {} systems from {}", config.systems.len(), path.display());
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// SystemData
// ---------------------------------------------------------------------------

/// A system and the tree of its entries.
#[derive(Debug)]
pub struct SystemData {
    info: Rc<SystemInfo>,
    tree: FileTree,
    root: FileId,
}

impl SystemData {
    /// Creates a system with an empty root folder at its start path.
    #[must_use]
    pub fn new(info: SystemInfo) -> Self {
        let info = Rc::new(info);
        let mut tree = FileTree::new();
        let root = tree.create(FileType::Folder, info.start_path.clone(), &info);
        Self { info, tree, root }
    }

    /// Creates a system from its configuration.
    #[must_use]
    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.to_info())
    }

    /// System description shared by every entry.
    #[must_use]
    pub fn info(&self) -> &Rc<SystemInfo> {
        &self.info
    }

    /// Short name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.info.full_name
    }

    /// The entry tree.
    #[must_use]
    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    /// The entry tree, mutably.
    pub fn tree_mut(&mut self) -> &mut FileTree {
        &mut self.tree
    }

    /// Root folder, at the start path.
    #[must_use]
    pub fn root(&self) -> FileId {
        self.root
    }

    /// Number of games anywhere under the root.
    #[must_use]
    pub fn game_count(&self) -> usize {
        self.tree
            .descendants_matching(self.root, FileTypeMask::GAME)
            .len()
    }

    /// Sorts the whole tree.
    pub fn sort(&mut self, sort_type: &SortType) {
        self.tree.sort_by_type(self.root, sort_type);
    }

    /// Scans the start path into the tree and returns the number of games
    /// added.
    ///
    /// Directories become folders and files with an accepted extension
    /// become games, visited in file-name order. Folders left without
    /// entries are dropped. Unreadable directories are logged and skipped.
    pub fn populate(&mut self) -> usize {
        let start = self.info.start_path.clone();
        let mut folders: HashMap<PathBuf, FileId> = HashMap::new();
        folders.insert(start.clone(), self.root);

        let walker = WalkDir::new(&start)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e.file_name()));
        let mut games = 0;
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable entry under {}: {err}", start.display());
                    continue;
                }
            };
            let path = entry.path();
            let Some(&parent) = path.parent().and_then(|p| folders.get(p)) else {
                continue;
            };
            let file_type = if entry.file_type().is_dir() {
                FileType::Folder
            } else if self.info.accepts(path) {
                FileType::Game
            } else {
                continue;
            };

            let id = self.tree.create(file_type, path, &self.info);
            match self.tree.add_child(parent, id) {
                Ok(true) => {}
                Ok(false) | Err(_) => {
                    self.tree.destroy(id);
                    continue;
                }
            }
            match file_type {
                FileType::Folder => {
                    folders.insert(path.to_path_buf(), id);
                }
                FileType::Game => games += 1,
            }
        }

        self.prune_empty_folders(self.root);
        log::info!("{}: found {games} games", self.info.name);
        games
    }

    /// Destroys folders under `id` that contain no games. Returns whether
    /// `id` itself is left empty.
    fn prune_empty_folders(&mut self, id: FileId) -> bool {
        let children = self.tree.children(id).to_vec();
        for child in children {
            if self.tree.get(child).file_type() == FileType::Folder
                && self.prune_empty_folders(child)
            {
                self.tree.destroy(child);
            }
        }
        self.tree.children(id).is_empty()
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
