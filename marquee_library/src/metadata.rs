// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-entry metadata dictionaries and their fixed schemas.
//!
//! Every entry carries a string→string map pre-seeded from the schema of its
//! [`FileType`]. The key sets match what gamelist loaders and savers expect.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::file_data::FileType;

/// Format of `releasedate` and `lastplayed` values.
pub const TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Value type of a metadata key, as used by editors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetaDataType {
    /// Single-line text.
    String,
    /// Integer.
    Int,
    /// Floating-point number.
    Float,
    /// `true` / `false`.
    Bool,
    /// Free text.
    MultilineString,
    /// Filesystem path.
    Path,
    /// `0.0`..=`1.0` star rating.
    Rating,
    /// Calendar date in [`TIME_FORMAT`].
    Date,
    /// Point in time in [`TIME_FORMAT`].
    Time,
}

/// One key of a metadata schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetaDataDecl {
    /// Dictionary key.
    pub key: &'static str,
    /// Value type.
    pub kind: MetaDataType,
    /// Value of a fresh entry.
    pub default_value: &'static str,
    /// Whether the value is a play statistic rather than descriptive data.
    pub is_statistic: bool,
    /// Label shown in editors.
    pub display_name: &'static str,
}

const fn decl(
    key: &'static str,
    kind: MetaDataType,
    default_value: &'static str,
    is_statistic: bool,
    display_name: &'static str,
) -> MetaDataDecl {
    MetaDataDecl {
        key,
        kind,
        default_value,
        is_statistic,
        display_name,
    }
}

/// Schema of game entries.
pub static GAME_METADATA: &[MetaDataDecl] = &[
    decl("name", MetaDataType::String, "", false, "name"),
    decl("desc", MetaDataType::MultilineString, "", false, "description"),
    decl("image", MetaDataType::Path, "", false, "image"),
    decl("video", MetaDataType::Path, "", false, "video"),
    decl("marquee", MetaDataType::Path, "", false, "marquee"),
    decl("thumbnail", MetaDataType::Path, "", false, "thumbnail"),
    decl("rating", MetaDataType::Rating, "0.000000", false, "rating"),
    decl("releasedate", MetaDataType::Date, "not-a-date-time", false, "release date"),
    decl("developer", MetaDataType::String, "unknown", false, "developer"),
    decl("publisher", MetaDataType::String, "unknown", false, "publisher"),
    decl("genre", MetaDataType::String, "unknown", false, "genre"),
    decl("players", MetaDataType::Int, "1", false, "players"),
    decl("playcount", MetaDataType::Int, "0", true, "play count"),
    decl("lastplayed", MetaDataType::Time, "0", true, "last played"),
];

/// Schema of folder entries.
pub static FOLDER_METADATA: &[MetaDataDecl] = &[
    decl("name", MetaDataType::String, "", false, "name"),
    decl("desc", MetaDataType::MultilineString, "", false, "description"),
    decl("image", MetaDataType::Path, "", false, "image"),
    decl("thumbnail", MetaDataType::Path, "", false, "thumbnail"),
    decl("video", MetaDataType::Path, "", false, "video"),
    decl("marquee", MetaDataType::Path, "", false, "marquee"),
];

/// Returns the schema for `file_type`.
#[must_use]
pub fn metadata_decls(file_type: FileType) -> &'static [MetaDataDecl] {
    match file_type {
        FileType::Game => GAME_METADATA,
        FileType::Folder => FOLDER_METADATA,
    }
}

/// A metadata dictionary seeded from a schema.
///
/// Reads of absent keys return the empty string; typed reads of values that
/// do not parse return the type's zero value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaDataList {
    file_type: FileType,
    map: HashMap<String, String>,
}

impl MetaDataList {
    /// Creates a dictionary holding the defaults of `file_type`'s schema.
    #[must_use]
    pub fn new(file_type: FileType) -> Self {
        let mut list = Self {
            file_type,
            map: HashMap::new(),
        };
        list.reset_to_defaults();
        list
    }

    /// Schema this dictionary was seeded from.
    #[must_use]
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Keys and defaults of the schema.
    #[must_use]
    pub fn decls(&self) -> &'static [MetaDataDecl] {
        metadata_decls(self.file_type)
    }

    /// Sets `key`. Keys outside the schema are stored too.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.map.insert(key.to_owned(), value.into());
    }

    /// Raw value of `key`, or `""`.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.map.get(key).map_or("", String::as_str)
    }

    /// Returns whether `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Value of `key` as an integer, or `0`.
    #[must_use]
    pub fn get_int(&self, key: &str) -> i64 {
        self.get(key).trim().parse().unwrap_or(0)
    }

    /// Value of `key` as a float, or `0.0`.
    #[must_use]
    pub fn get_float(&self, key: &str) -> f64 {
        self.get(key).trim().parse().unwrap_or(0.0)
    }

    /// Whether `key` holds `"true"`.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key) == "true"
    }

    /// Value of `key` as a time, or `None` when it is not in
    /// [`TIME_FORMAT`] (including `not-a-date-time` and `0`).
    #[must_use]
    pub fn get_time(&self, key: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.get(key), TIME_FORMAT).ok()
    }

    /// Stores `time` under `key` in [`TIME_FORMAT`].
    pub fn set_time(&mut self, key: &str, time: NaiveDateTime) {
        self.set(key, time.format(TIME_FORMAT).to_string());
    }

    /// Drops every value and restores the schema defaults.
    pub fn reset_to_defaults(&mut self) {
        self.map.clear();
        for decl in metadata_decls(self.file_type) {
            self.map.insert(decl.key.to_owned(), decl.default_value.to_owned());
        }
    }

    /// Whether every schema key still holds its default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.decls().iter().all(|d| self.get(d.key) == d.default_value)
    }

    /// Iterates over all key/value pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
