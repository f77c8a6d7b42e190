// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry comparators and the sort registry views choose from.

use core::cmp::Ordering;

use crate::file_data::FileData;

/// Orders two entries for [`FileTree::sort`](crate::FileTree::sort).
pub type Comparator = fn(&FileData, &FileData) -> Ordering;

/// A named sort a view can offer.
#[derive(Clone, Copy, Debug)]
pub struct SortType {
    /// Ordering of entries.
    pub comparator: Comparator,
    /// `false` reverses every level after sorting.
    pub ascending: bool,
    /// Label shown to the user.
    pub description: &'static str,
}

/// Compares `name` metadata, ignoring case.
pub fn compare_file_name(a: &FileData, b: &FileData) -> Ordering {
    a.name().to_lowercase().cmp(&b.name().to_lowercase())
}

/// Compares the `rating` metadata.
pub fn compare_rating(a: &FileData, b: &FileData) -> Ordering {
    a.metadata
        .get_float("rating")
        .total_cmp(&b.metadata.get_float("rating"))
}

/// Compares the `playcount` metadata.
pub fn compare_times_played(a: &FileData, b: &FileData) -> Ordering {
    a.metadata.get_int("playcount").cmp(&b.metadata.get_int("playcount"))
}

/// Most recently played first. Entries never played sort last.
pub fn compare_last_played(a: &FileData, b: &FileData) -> Ordering {
    let a = a.metadata.get_time("lastplayed");
    let b = b.metadata.get_time("lastplayed");
    b.cmp(&a)
}

/// Every sort offered by gamelist views, in menu order.
pub static SORT_TYPES: [SortType; 8] = [
    SortType {
        comparator: compare_file_name,
        ascending: true,
        description: "filename, ascending",
    },
    SortType {
        comparator: compare_file_name,
        ascending: false,
        description: "filename, descending",
    },
    SortType {
        comparator: compare_rating,
        ascending: true,
        description: "rating, ascending",
    },
    SortType {
        comparator: compare_rating,
        ascending: false,
        description: "rating, descending",
    },
    SortType {
        comparator: compare_times_played,
        ascending: true,
        description: "times played, ascending",
    },
    SortType {
        comparator: compare_times_played,
        ascending: false,
        description: "times played, descending",
    },
    SortType {
        comparator: compare_last_played,
        ascending: true,
        description: "last played, ascending",
    },
    SortType {
        comparator: compare_last_played,
        ascending: false,
        description: "last played, descending",
    },
];
