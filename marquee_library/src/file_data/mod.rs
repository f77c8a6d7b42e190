// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Metadata tree data model.
//!
//! A [`FileTree`] holds the entries of one or more systems: *games* (leaves)
//! and *folders* (groups). Each entry has:
//!
//! - An identity ([`FileId`]), a generational handle that becomes stale when
//!   the entry is destroyed.
//! - A path, and a shared reference to the [`SystemInfo`] it belongs to.
//! - A parent (lookup only) and, for folders, an ordered list of children
//!   plus a basename index kept in exact sync with that list.
//! - A [`MetaDataList`] seeded from its type's schema, whose `name` key is
//!   never empty.
//!
//! [`SystemInfo`]: crate::SystemInfo
//! [`MetaDataList`]: crate::metadata::MetaDataList

mod tree;

pub use tree::{FileData, FileTree};

use core::fmt;
use core::ops::BitOr;
use core::str::FromStr;

use crate::error::ParseFileTypeError;

/// Kind of a metadata entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FileType {
    /// A launchable entry. Cannot have children.
    Game = 1,
    /// A group of entries.
    Folder = 2,
}

impl FileType {
    /// Name used in gamelist files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = ParseFileTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "game" => Ok(Self::Game),
            "folder" => Ok(Self::Folder),
            _ => Err(ParseFileTypeError(s.to_owned())),
        }
    }
}

/// A set of [`FileType`]s, for [`FileTree::descendants_matching`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FileTypeMask(u32);

impl FileTypeMask {
    /// Games only.
    pub const GAME: Self = Self(FileType::Game as u32);
    /// Folders only.
    pub const FOLDER: Self = Self(FileType::Folder as u32);
    /// Games and folders.
    pub const ALL: Self = Self(FileType::Game as u32 | FileType::Folder as u32);

    /// Returns whether `file_type` is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, file_type: FileType) -> bool {
        self.0 & file_type as u32 != 0
    }
}

impl From<FileType> for FileTypeMask {
    fn from(file_type: FileType) -> Self {
        Self(file_type as u32)
    }
}

impl BitOr for FileTypeMask {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// What happened to an entry, as reported by [`FileTree::drain_changes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileChangeType {
    /// The entry was attached to a folder.
    Added,
    /// A metadata value changed through [`FileTree::set_metadata`].
    MetadataChanged,
    /// The entry was detached from its folder.
    Removed,
    /// The entry's subtree was sorted.
    Sorted,
}

/// A handle to an entry in a [`FileTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl FileId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({}@gen{})", self.idx, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_strings() {
        assert_eq!("game".parse(), Ok(FileType::Game));
        assert_eq!(FileType::Folder.to_string(), "folder");
        assert_eq!(
            "rom".parse::<FileType>(),
            Err(ParseFileTypeError("rom".into()))
        );
    }

    #[test]
    fn masks() {
        assert!(FileTypeMask::GAME.contains(FileType::Game));
        assert!(!FileTypeMask::GAME.contains(FileType::Folder));
        assert_eq!(FileTypeMask::GAME | FileTypeMask::FOLDER, FileTypeMask::ALL);
        assert_eq!(FileTypeMask::from(FileType::Folder), FileTypeMask::FOLDER);
        assert!(!FileTypeMask::default().contains(FileType::Game));
    }
}
