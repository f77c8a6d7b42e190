// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component tree data model.
//!
//! A *component* is a node in the on-screen scene graph. Each component has:
//!
//! - An identity ([`ComponentId`]), a generational handle that becomes stale
//!   when the component is destroyed.
//! - Topology: a parent, children in insertion order and children in draw
//!   order (see [`sort_children`](ComponentTree::sort_children)).
//! - A [`Layout`]: position, origin, rotation origin, size, rotation, scale
//!   and z-index. The local transform derived from it is cached until a
//!   setter invalidates it.
//! - An opacity, 0 (transparent) to 255 (opaque).
//! - Four animation slots, advanced by [`update`](ComponentTree::update).
//! - A [`Behavior`] that specializes rendering, theming and value access.
//!
//! # Dirty tracking
//!
//! Mutations mark the corresponding dirty channel (see
//! [`dirty`](crate::dirty)):
//!
//! - **TRANSFORM** / **OPACITY** propagate to all descendants.
//! - **TOPOLOGY** covers create, destroy, reparenting and draw-order changes.

mod animate;
mod behavior;
mod evaluate;
mod id;
mod layout;
mod store;
mod traverse;

pub use behavior::{Behavior, Container, HelpPrompt};
pub use evaluate::FrameChanges;
pub use id::{ComponentId, INVALID};
pub use layout::Layout;
pub use store::ComponentTree;
pub use traverse::Children;
