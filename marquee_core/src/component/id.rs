// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component identity.

use core::fmt;

/// Sentinel value indicating "no component" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a component in a [`ComponentTree`](super::ComponentTree).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a component is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId {
    /// Slot index into the tree's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the tree's generation for this slot.
    pub(crate) generation: u32,
}

impl ComponentId {
    /// Returns the raw slot index (for diagnostics and [`FrameChanges`]
    /// lookups).
    ///
    /// [`FrameChanges`]: super::FrameChanges
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({}@gen{})", self.idx, self.generation)
    }
}
