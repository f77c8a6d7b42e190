// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays component storage with allocation, topology, and layout
//! management.

use core::any::Any;
use core::cell::Cell;

use kurbo::{Point, Size, Vec2};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use crate::animation::{AnimationController, MAX_ANIMATIONS};
use crate::dirty;
use crate::theme::{ThemeData, ThemeFlags};
use crate::transform::{Transform3d, Vec3};

use super::animate::InFlight;
use super::behavior::{Behavior, Container, HelpPrompt};
use super::id::{ComponentId, INVALID};
use super::layout::Layout;
use super::traverse::Children;

/// Struct-of-arrays storage for all components.
///
/// Components are addressed by [`ComponentId`] handles. Internally, each
/// component occupies a slot in parallel arrays. Destroyed components are
/// recycled via a free list, and generation counters prevent stale handle
/// access.
///
/// Children are kept in two orders: *insertion order*, used by
/// [`update`](Self::update) and [`child`](Self::child), and *draw order*,
/// which [`sort_children`](Self::sort_children) recomputes from insertion
/// order by z-index and which [`render`](Self::render) follows.
#[derive(Debug)]
pub struct ComponentTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) children: Vec<Vec<u32>>,
    pub(crate) draw_order: Vec<Vec<u32>>,

    // -- Per-component state --
    pub(crate) layout: Vec<Layout>,
    pub(crate) local_transform: Vec<Cell<Transform3d>>,
    pub(crate) transform_stale: Vec<Cell<bool>>,
    pub(crate) opacity: Vec<u8>,
    pub(crate) animations: Vec<[Option<AnimationController>; MAX_ANIMATIONS]>,
    /// Slots whose controller is out of its slot while it applies.
    pub(crate) in_flight: Vec<InFlight>,
    pub(crate) behavior: Vec<Box<dyn Behavior>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
    #[cfg(feature = "trace")]
    pub(crate) animation_events: Vec<crate::trace::AnimationEvent>,

    /// Reference size for themed root components.
    pub(crate) screen_size: Size,
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentTree {
    /// Creates an empty tree for a 1280×720 screen.
    #[must_use]
    pub fn new() -> Self {
        Self::with_screen_size(Size::new(1280.0, 720.0))
    }

    /// Creates an empty tree whose themed root components scale against
    /// `screen_size`.
    #[must_use]
    pub fn with_screen_size(screen_size: Size) -> Self {
        Self {
            parent: Vec::new(),
            children: Vec::new(),
            draw_order: Vec::new(),
            layout: Vec::new(),
            local_transform: Vec::new(),
            transform_stale: Vec::new(),
            opacity: Vec::new(),
            animations: Vec::new(),
            in_flight: Vec::new(),
            behavior: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            #[cfg(feature = "trace")]
            animation_events: Vec::new(),
            screen_size,
        }
    }

    /// Returns the screen size used for themed root components.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen_size
    }

    /// Sets the screen size used for themed root components.
    pub fn set_screen_size(&mut self, size: Size) {
        self.screen_size = size;
    }

    // -- Allocation API --

    /// Creates a new component and returns its handle.
    ///
    /// The component starts with default layout, full opacity, empty
    /// animation slots and no parent.
    pub fn create(&mut self, behavior: impl Behavior) -> ComponentId {
        let behavior: Box<dyn Behavior> = Box::new(behavior);
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.children[i].clear();
            self.draw_order[i].clear();
            self.layout[i] = Layout::default();
            self.local_transform[i].set(Transform3d::IDENTITY);
            self.transform_stale[i].set(false);
            self.opacity[i] = 255;
            self.animations[i] = Default::default();
            self.behavior[i] = behavior;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.children.push(Vec::new());
            self.draw_order.push(Vec::new());
            self.layout.push(Layout::default());
            self.local_transform.push(Cell::new(Transform3d::IDENTITY));
            self.transform_stale.push(Cell::new(false));
            self.opacity.push(255);
            self.animations.push(Default::default());
            self.behavior.push(behavior);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        ComponentId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a component, freeing its slot for reuse.
    ///
    /// Running animations are canceled without their callbacks, and the
    /// component is detached from its parent.
    ///
    /// # Panics
    ///
    /// Panics if the component still has children (detach or destroy them
    /// first) or if the handle is stale.
    pub fn destroy(&mut self, id: ComponentId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.children[idx as usize].is_empty(),
            "cannot destroy component with children"
        );

        self.cancel_all_animations(id);
        if self.parent[idx as usize] != INVALID {
            self.detach(idx);
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.behavior[idx as usize] = Box::new(Container);

        self.free_list.push(idx);
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live component.
    #[must_use]
    pub fn is_alive(&self, id: ComponentId) -> bool {
        // Generations are bumped on both destroy and reuse, so a freed slot
        // never matches a handle.
        id.idx < self.len && self.generation[id.idx as usize] == id.generation
    }

    /// Returns the number of live components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns whether the tree holds no live components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -- Topology API --

    /// Appends `child` to `parent`'s children.
    ///
    /// A child that already has a parent is moved: it is first removed from
    /// its old parent.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` is `parent` or one of
    /// its ancestors.
    pub fn add_child(&mut self, parent: ComponentId, child: ComponentId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            !self.is_ancestor_or_self(c, p),
            "cannot add a component as a descendant of itself"
        );

        if self.parent[c as usize] != INVALID {
            self.detach(c);
        }

        self.parent[c as usize] = p;
        self.children[p as usize].push(c);
        self.draw_order[p as usize].push(c);

        // Child depends on parent for TRANSFORM and OPACITY.
        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);

        self.mark_subtree_inherited_dirty(c);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `child` from `parent`.
    ///
    /// Returns `false`, changing nothing, when `child` is not a child of
    /// `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn remove_child(&mut self, parent: ComponentId, child: ComponentId) -> bool {
        self.validate(parent);
        self.validate(child);
        let actual = self.parent[child.idx as usize];
        if actual != parent.idx {
            if actual != INVALID {
                log::warn!("tried to remove {child:?} from {parent:?}, which is not its parent");
            }
            return false;
        }
        self.detach(child.idx);
        true
    }

    /// Detaches every child of `id`. The children stay alive as roots.
    pub fn clear_children(&mut self, id: ComponentId) {
        self.validate(id);
        let children = self.children[id.idx as usize].clone();
        for c in children {
            self.detach(c);
        }
    }

    /// Recomputes the draw order of `id`'s children: insertion order, stably
    /// sorted by ascending z-index.
    pub fn sort_children(&mut self, id: ComponentId) {
        self.validate(id);
        let mut order = self.children[id.idx as usize].clone();
        order.sort_by(|&a, &b| {
            self.layout[a as usize]
                .z_index
                .total_cmp(&self.layout[b as usize].z_index)
        });
        self.draw_order[id.idx as usize] = order;
        self.dirty.mark(id.idx, dirty::TOPOLOGY);
    }

    /// Returns the parent of a component, if any.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn child_count(&self, id: ComponentId) -> usize {
        self.validate(id);
        self.children[id.idx as usize].len()
    }

    /// Returns the `i`-th child in insertion order.
    #[must_use]
    pub fn child(&self, id: ComponentId, i: usize) -> Option<ComponentId> {
        self.validate(id);
        self.children[id.idx as usize].get(i).map(|&c| self.handle(c))
    }

    /// Returns an iterator over the direct children in insertion order.
    #[must_use]
    pub fn children(&self, id: ComponentId) -> Children<'_> {
        self.validate(id);
        Children::new(self, &self.children[id.idx as usize])
    }

    /// Returns an iterator over the direct children in draw order.
    #[must_use]
    pub fn draw_order(&self, id: ComponentId) -> Children<'_> {
        self.validate(id);
        Children::new(self, &self.draw_order[id.idx as usize])
    }

    // -- Layout getters --

    /// Returns the full layout of a component.
    #[must_use]
    pub fn layout(&self, id: ComponentId) -> &Layout {
        self.validate(id);
        &self.layout[id.idx as usize]
    }

    /// Returns the position.
    #[must_use]
    pub fn position(&self, id: ComponentId) -> Vec3 {
        self.layout(id).position
    }

    /// Returns the origin.
    #[must_use]
    pub fn origin(&self, id: ComponentId) -> Vec2 {
        self.layout(id).origin
    }

    /// Returns the rotation origin.
    #[must_use]
    pub fn rotation_origin(&self, id: ComponentId) -> Vec2 {
        self.layout(id).rotation_origin
    }

    /// Returns the size.
    #[must_use]
    pub fn size(&self, id: ComponentId) -> Size {
        self.layout(id).size
    }

    /// Returns the rotation in radians.
    #[must_use]
    pub fn rotation(&self, id: ComponentId) -> f64 {
        self.layout(id).rotation
    }

    /// Returns the scale.
    #[must_use]
    pub fn scale(&self, id: ComponentId) -> f64 {
        self.layout(id).scale
    }

    /// Returns the current z-index.
    #[must_use]
    pub fn z_index(&self, id: ComponentId) -> f64 {
        self.layout(id).z_index
    }

    /// Returns the default z-index.
    #[must_use]
    pub fn default_z_index(&self, id: ComponentId) -> f64 {
        self.layout(id).default_z_index
    }

    /// Returns the center of the component's box in its parent's space.
    #[must_use]
    pub fn center(&self, id: ComponentId) -> Point {
        self.layout(id).center()
    }

    // -- Layout setters (invalidate the cached transform, run hooks) --

    /// Sets the position.
    pub fn set_position(&mut self, id: ComponentId, position: Vec3) {
        self.validate(id);
        let i = id.idx as usize;
        self.layout[i].position = position;
        self.invalidate_transform(id.idx);
        self.behavior[i].on_position_changed(&self.layout[i]);
    }

    /// Sets the origin, as a fraction of the size.
    pub fn set_origin(&mut self, id: ComponentId, origin: Vec2) {
        self.validate(id);
        let i = id.idx as usize;
        self.layout[i].origin = origin;
        self.invalidate_transform(id.idx);
        self.behavior[i].on_origin_changed(&self.layout[i]);
    }

    /// Sets the rotation origin, as a fraction of the size.
    pub fn set_rotation_origin(&mut self, id: ComponentId, origin: Vec2) {
        self.validate(id);
        self.layout[id.idx as usize].rotation_origin = origin;
        self.invalidate_transform(id.idx);
    }

    /// Sets the size.
    pub fn set_size(&mut self, id: ComponentId, size: Size) {
        self.validate(id);
        let i = id.idx as usize;
        self.layout[i].size = size;
        self.invalidate_transform(id.idx);
        self.behavior[i].on_size_changed(&self.layout[i]);
    }

    /// Sets the rotation in radians.
    pub fn set_rotation(&mut self, id: ComponentId, radians: f64) {
        self.validate(id);
        self.layout[id.idx as usize].rotation = radians;
        self.invalidate_transform(id.idx);
    }

    /// Sets the rotation in degrees.
    pub fn set_rotation_degrees(&mut self, id: ComponentId, degrees: f64) {
        self.set_rotation(id, degrees.to_radians());
    }

    /// Sets the scale.
    pub fn set_scale(&mut self, id: ComponentId, scale: f64) {
        self.validate(id);
        self.layout[id.idx as usize].scale = scale;
        self.invalidate_transform(id.idx);
    }

    /// Sets the current z-index. Takes effect at the parent's next
    /// [`sort_children`](Self::sort_children).
    pub fn set_z_index(&mut self, id: ComponentId, z_index: f64) {
        self.validate(id);
        self.layout[id.idx as usize].z_index = z_index;
    }

    /// Sets the default z-index.
    pub fn set_default_z_index(&mut self, id: ComponentId, z_index: f64) {
        self.validate(id);
        self.layout[id.idx as usize].default_z_index = z_index;
    }

    // -- Transforms --

    /// Returns the local transform, recomputing it if any layout input
    /// changed since the last call.
    #[must_use]
    pub fn transform(&self, id: ComponentId) -> Transform3d {
        self.validate(id);
        self.local_transform_at(id.idx)
    }

    /// Returns the product of the local transforms from the root down to
    /// `id`.
    #[must_use]
    pub fn world_transform(&self, id: ComponentId) -> Transform3d {
        self.validate(id);
        let mut chain = vec![id.idx];
        let mut p = self.parent[id.idx as usize];
        while p != INVALID {
            chain.push(p);
            p = self.parent[p as usize];
        }
        chain
            .iter()
            .rev()
            .fold(Transform3d::IDENTITY, |acc, &idx| acc * self.local_transform_at(idx))
    }

    // -- Opacity --

    /// Returns the opacity (0–255).
    #[must_use]
    pub fn opacity(&self, id: ComponentId) -> u8 {
        self.validate(id);
        self.opacity[id.idx as usize]
    }

    /// Sets the opacity and lets the behavior derive its own channels from it.
    ///
    /// Marks the OPACITY channel dirty with eager propagation to descendants.
    pub fn set_opacity(&mut self, id: ComponentId, opacity: u8) {
        self.validate(id);
        self.opacity[id.idx as usize] = opacity;
        self.behavior[id.idx as usize].set_opacity(opacity);
        self.dirty.mark_with(id.idx, dirty::OPACITY, &EagerPolicy);
    }

    // -- Behavior access --

    /// Returns the behavior of `id` if it is a `T`.
    #[must_use]
    pub fn behavior<T: Behavior>(&self, id: ComponentId) -> Option<&T> {
        self.validate(id);
        let any: &dyn Any = &*self.behavior[id.idx as usize];
        any.downcast_ref::<T>()
    }

    /// Returns the behavior of `id` mutably if it is a `T`.
    #[must_use]
    pub fn behavior_mut<T: Behavior>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.validate(id);
        let any: &mut dyn Any = &mut *self.behavior[id.idx as usize];
        any.downcast_mut::<T>()
    }

    /// Returns the component's value (e.g. the text of a text component).
    #[must_use]
    pub fn value(&self, id: ComponentId) -> String {
        self.validate(id);
        self.behavior[id.idx as usize].value()
    }

    /// Sets the component's value.
    pub fn set_value(&mut self, id: ComponentId, value: &str) {
        self.validate(id);
        self.behavior[id.idx as usize].set_value(value);
    }

    /// Returns the help prompts of `id`.
    #[must_use]
    pub fn help_prompts(&self, id: ComponentId) -> Vec<HelpPrompt> {
        self.validate(id);
        self.behavior[id.idx as usize].help_prompts()
    }

    // -- Theming --

    /// Applies the theme element `(view, element)` to `id`.
    ///
    /// Layout properties requested by `flags` are read first: `pos` and `size`
    /// are fractions of the parent's size (the screen size for roots),
    /// `origin` applies when `ORIGIN`, or both `POSITION` and `SIZE`, are
    /// requested, `rotation` is in degrees. The z-index is reset to the
    /// default unless the element sets `zIndex`. The behavior then reads its
    /// own properties. Missing elements or properties change nothing.
    pub fn apply_theme(
        &mut self,
        id: ComponentId,
        theme: &ThemeData,
        view: &str,
        element: &str,
        flags: ThemeFlags,
    ) {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        let scale = if p != INVALID {
            self.layout[p as usize].size
        } else {
            self.screen_size
        };

        if let Some(elem) = theme.get_element(view, element, "") {
            if flags.contains(ThemeFlags::POSITION)
                && let Some(pos) = elem.get_pair("pos")
            {
                self.set_position(
                    id,
                    Vec3::new(pos.x * scale.width, pos.y * scale.height, 0.0),
                );
            }
            if flags.contains(ThemeFlags::SIZE)
                && let Some(size) = elem.get_pair("size")
            {
                self.set_size(id, Size::new(size.x * scale.width, size.y * scale.height));
            }
            let origin_requested = flags.contains(ThemeFlags::ORIGIN)
                || flags.contains(ThemeFlags::POSITION | ThemeFlags::SIZE);
            if origin_requested && let Some(origin) = elem.get_pair("origin") {
                self.set_origin(id, origin);
            }
            if flags.contains(ThemeFlags::ROTATION) {
                if let Some(degrees) = elem.get_float("rotation") {
                    self.set_rotation_degrees(id, degrees);
                }
                if let Some(origin) = elem.get_pair("rotationOrigin") {
                    self.set_rotation_origin(id, origin);
                }
            }
            match elem.get_float("zIndex") {
                Some(z) if flags.contains(ThemeFlags::Z_INDEX) => self.set_z_index(id, z),
                _ => self.set_z_index(id, self.default_z_index(id)),
            }
        }

        self.behavior[id.idx as usize].apply_theme(theme, view, element, flags);
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ComponentId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ComponentId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> ComponentId {
        ComponentId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns the cached local transform at `idx`, recomputing it if stale.
    pub(crate) fn local_transform_at(&self, idx: u32) -> Transform3d {
        let i = idx as usize;
        if self.transform_stale[i].get() {
            self.local_transform[i].set(self.layout[i].local_transform());
            self.transform_stale[i].set(false);
        }
        self.local_transform[i].get()
    }

    /// Flags the cached transform stale and marks TRANSFORM with eager
    /// propagation to descendants.
    fn invalidate_transform(&mut self, idx: u32) {
        self.transform_stale[idx as usize].set(true);
        self.dirty.mark_with(idx, dirty::TRANSFORM, &EagerPolicy);
    }

    /// Returns whether `ancestor` is `idx` or one of its ancestors.
    fn is_ancestor_or_self(&self, ancestor: u32, mut idx: u32) -> bool {
        while idx != INVALID {
            if idx == ancestor {
                return true;
            }
            idx = self.parent[idx as usize];
        }
        false
    }

    /// Removes `idx` from its parent's child lists and dependency edges.
    fn detach(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        self.children[p as usize].retain(|&c| c != idx);
        self.draw_order[p as usize].retain(|&c| c != idx);
        self.parent[idx as usize] = INVALID;

        self.dirty.remove_dependency(idx, p, dirty::TRANSFORM);
        self.dirty.remove_dependency(idx, p, dirty::OPACITY);

        self.mark_subtree_inherited_dirty(idx);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Marks the subtree rooted at `idx` dirty for inherited channels.
    fn mark_subtree_inherited_dirty(&mut self, idx: u32) {
        self.dirty.mark_with(idx, dirty::TRANSFORM, &EagerPolicy);
        self.dirty.mark_with(idx, dirty::OPACITY, &EagerPolicy);
    }
}
