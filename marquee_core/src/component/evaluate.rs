// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame evaluation and change tracking.
//!
//! Evaluation drains each dirty channel into a [`FrameChanges`]:
//!
//! 1. **TRANSFORM** — components whose on-screen placement changed, including
//!    every descendant of a moved component.
//! 2. **OPACITY** — components whose opacity (or an ancestor's) changed.
//! 3. **TOPOLOGY** — drained; any entry sets `topology_changed`.
//!
//! Nothing is recomputed here: local transforms are cached lazily by
//! [`ComponentTree::transform`] and rendering composes them on the way down.
//! `FrameChanges` uses raw slot indices (`u32`) rather than [`ComponentId`]
//! handles so that retained-mode renderers can key their own state by slot.
//!
//! [`ComponentId`]: super::ComponentId

use super::store::ComponentTree;
use crate::dirty;

/// The set of changes produced by a single [`ComponentTree::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Components whose placement changed.
    pub transforms: Vec<u32>,
    /// Components whose opacity changed.
    pub opacities: Vec<u32>,
    /// Components created since the last evaluate.
    pub added: Vec<u32>,
    /// Components destroyed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether parent/child links or draw order changed.
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.opacities.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
            && self.opacities.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl ComponentTree {
    /// Drains the dirty channels and returns what changed since the last call.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();

        changes.transforms = self
            .dirty
            .drain(dirty::TRANSFORM)
            .affected()
            .deterministic()
            .run()
            .collect();
        changes.opacities = self
            .dirty
            .drain(dirty::OPACITY)
            .affected()
            .deterministic()
            .run()
            .collect();
        let topology: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes.topology_changed = !topology.is_empty();

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }
}
