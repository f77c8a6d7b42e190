// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal: child iteration, update, render and visibility passes.

use kurbo::Rect;

use crate::animation::MAX_ANIMATIONS;
use crate::render::RenderContext;
use crate::transform::Transform3d;

use super::id::ComponentId;
use super::store::ComponentTree;

/// Fill color of the bounds drawn when `debug_grid` is set.
const DEBUG_GRID_COLOR: u32 = 0x00FF_0022;

/// An iterator over the direct children of a component.
///
/// Created by [`ComponentTree::children`] and [`ComponentTree::draw_order`].
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a ComponentTree,
    iter: core::slice::Iter<'a, u32>,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a ComponentTree, indices: &'a [u32]) -> Self {
        Self {
            tree,
            iter: indices.iter(),
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ComponentId;

    fn next(&mut self) -> Option<ComponentId> {
        self.iter.next().map(|&idx| self.tree.handle(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}

impl ComponentTree {
    /// Advances `id` and its subtree by `delta_ms`.
    ///
    /// Every occupied animation slot is advanced, then the behavior updates,
    /// then children are visited in insertion order. Components destroyed by
    /// an animation callback during the pass are skipped.
    pub fn update(&mut self, id: ComponentId, delta_ms: u32) {
        self.validate(id);
        for slot in 0..MAX_ANIMATIONS {
            self.advance_animation(id, slot, delta_ms);
            if !self.is_alive(id) {
                return;
            }
        }
        self.behavior[id.idx as usize].update(delta_ms);

        let children: Vec<ComponentId> = self.children(id).collect();
        for child in children {
            if self.is_alive(child) {
                self.update(child, delta_ms);
            }
        }
    }

    /// Draws `id` and its subtree under `parent_transform`.
    ///
    /// The behavior draws with `parent_transform * transform(id)`, then the
    /// children are drawn under that transform in draw order (see
    /// [`sort_children`](Self::sort_children)). Returns the number of
    /// components visited.
    pub fn render(
        &self,
        id: ComponentId,
        parent_transform: &Transform3d,
        cx: &mut RenderContext<'_>,
    ) -> u32 {
        self.validate(id);
        self.render_at(id.idx, parent_transform, cx)
    }

    /// Notifies `id` and its subtree that they became visible.
    pub fn on_show(&mut self, id: ComponentId) {
        self.validate(id);
        self.behavior[id.idx as usize].on_show();
        let children: Vec<ComponentId> = self.children(id).collect();
        for child in children {
            self.on_show(child);
        }
    }

    /// Notifies `id` and its subtree that they were hidden.
    pub fn on_hide(&mut self, id: ComponentId) {
        self.validate(id);
        self.behavior[id.idx as usize].on_hide();
        let children: Vec<ComponentId> = self.children(id).collect();
        for child in children {
            self.on_hide(child);
        }
    }

    fn render_at(
        &self,
        idx: u32,
        parent_transform: &Transform3d,
        cx: &mut RenderContext<'_>,
    ) -> u32 {
        let i = idx as usize;
        let transform = *parent_transform * self.local_transform_at(idx);
        let layout = &self.layout[i];
        self.behavior[i].render(layout, &transform, cx);

        if cx.settings.debug_grid {
            cx.renderer.set_matrix(&transform);
            cx.renderer
                .draw_rect(Rect::from_origin_size((0.0, 0.0), layout.size), DEBUG_GRID_COLOR);
        }

        let mut count = 1;
        for &child in &self.draw_order[i] {
            count += self.render_at(child, &transform, cx);
        }
        count
    }
}
