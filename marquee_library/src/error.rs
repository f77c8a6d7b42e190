// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// A structural precondition of [`FileTree`](crate::FileTree) was violated.
///
/// These are caller mistakes (dropping a game onto a game, adopting a node
/// that already has a parent). They are returned rather than panicking so UI
/// code can refuse the action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The would-be parent is a game.
    #[error("InvalidOperation: children not allowed on non-group node")]
    NotAGroup,
    /// The node already belongs to a folder.
    #[error("InvalidOperation: node already has a parent")]
    AlreadyParented,
    /// The node is not a child of the given folder.
    #[error("InvalidOperation: node is not a child of this group")]
    NotAChild,
    /// The node is the folder itself or one of its ancestors.
    #[error("InvalidOperation: node cannot become its own descendant")]
    Cycle,
    /// Another child of the folder already has the new file name.
    #[error("InvalidOperation: a sibling already has this file name")]
    NameTaken,
}

/// A file type string other than `game` or `folder`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown file type {0:?}")]
pub struct ParseFileTypeError(pub String);

/// Failure to load a systems configuration.
#[derive(Debug, Error)]
pub enum SystemsError {
    /// The file could not be read.
    #[error("failed to read systems file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The text is not a valid systems configuration.
    #[error("failed to parse systems: {0}")]
    Parse(#[from] toml::de::Error),
}
