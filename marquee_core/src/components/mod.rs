// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in component behaviors.

mod text;

pub use text::TextComponent;
