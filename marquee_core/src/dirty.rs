// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The component tree uses multi-channel dirty tracking (via
//! [`understory_dirty`]) to report which components changed since the last
//! frame. Each channel represents an independent category of change.
//!
//! # Propagation semantics
//!
//! - **Propagating** — [`TRANSFORM`] and [`OPACITY`] use
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and have dependency
//!   edges from child to parent. Moving or fading a parent marks every
//!   descendant, since what ends up on screen for them changes too.
//!
//! - **Structural** — [`TOPOLOGY`] is marked on topology mutations
//!   (add/remove child, create/destroy component, child re-sort). It does not
//!   propagate to descendants.
//!
//! This is separate from the per-component cached local transform, which is
//! invalidated by a plain flag on every layout setter and recomputed lazily by
//! [`ComponentTree::transform`](crate::component::ComponentTree::transform).
//!
//! # Consumption
//!
//! Each [`ComponentTree::evaluate`](crate::component::ComponentTree::evaluate)
//! call drains all channels and surfaces the results as
//! [`FrameChanges`](crate::component::FrameChanges), which renderers
//! [consume](crate::render::Renderer::apply) to apply incremental updates.

use understory_dirty::Channel;

/// Layout changed — the component and its descendants moved on screen.
pub const TRANSFORM: Channel = Channel::new(0);

/// Opacity changed — requires redraw of the component and its descendants.
pub const OPACITY: Channel = Channel::new(1);

/// Tree topology or draw order changed.
pub const TOPOLOGY: Channel = Channel::new(2);
