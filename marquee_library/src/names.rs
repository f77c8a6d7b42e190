// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clean-name derivation.

use std::sync::LazyLock;

use regex::Regex;

static TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^)]*\)|\[[^\]]*\]").expect("tag pattern is valid")
});

/// Removes every `(...)` and `[...]` section from `name`.
///
/// Whitespace runs left behind collapse to a single space and the result is
/// trimmed, so `"Super Game (USA) [!]"` becomes `"Super Game"`. Unbalanced
/// brackets are kept as they are.
#[must_use]
pub fn remove_parenthesis(name: &str) -> String {
    let stripped = TAGS.replace_all(name, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
