// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Game-library data model for the Marquee front-end.
//!
//! `marquee_library` is the data half of the front-end: a tree of *entries*
//! (games and folders) per configured system, each carrying a typed metadata
//! dictionary, plus the name resolution and sorting that views rely on.
//!
//! **[`file_data`]** — [`FileTree`] arena with generational [`FileId`]
//! handles, folder topology with a basename index, recursive stable sort and
//! change recording.
//!
//! **[`metadata`]** — Per-type metadata schemas and the
//! [`MetaDataList`](metadata::MetaDataList) dictionary.
//!
//! **[`sort`]** — Entry comparators and the [`SORT_TYPES`] registry.
//!
//! **[`system`]** — [`SystemInfo`], the TOML systems file and the directory
//! scanner that fills a [`SystemData`].
//!
//! **[`mame_names`]** / **[`names`]** — Arcade short-name translation and
//! removal of `(...)`/`[...]` tags from titles.
//!
//! **[`platform`]** — Known platform identifiers.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use marquee_library::{FileTree, FileType, SystemInfo, SORT_TYPES};
//!
//! let sys = Rc::new(SystemInfo::new("snes", "Super Nintendo", "/roms/snes"));
//! let mut tree = FileTree::new();
//! let root = tree.create(FileType::Folder, "/roms/snes", &sys);
//! let b = tree.create(FileType::Game, "/roms/snes/b.sfc", &sys);
//! let a = tree.create(FileType::Game, "/roms/snes/a.sfc", &sys);
//! tree.add_child(root, b).unwrap();
//! tree.add_child(root, a).unwrap();
//!
//! tree.sort_by_type(root, &SORT_TYPES[0]);
//! assert_eq!(tree.children(root), &[a, b]);
//! ```

pub mod error;
pub mod file_data;
pub mod mame_names;
pub mod metadata;
pub mod names;
pub mod platform;
pub mod sort;
pub mod system;

pub use error::{ParseFileTypeError, SystemsError, TreeError};
pub use file_data::{FileChangeType, FileData, FileId, FileTree, FileType, FileTypeMask};
pub use metadata::{MetaDataList, MetaDataType};
pub use platform::PlatformId;
pub use sort::{Comparator, SORT_TYPES, SortType};
pub use system::{SystemConfig, SystemData, SystemInfo, SystemsConfig};
