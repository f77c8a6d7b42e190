// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component tree, transforms, animation and theming for the Marquee
//! game-library front-end.
//!
//! `marquee_core` is the presentation half of the front-end: a scene graph of
//! *components* that carry layout state, up to four animation slots, an
//! opacity and a theming hook. Views build screens out of components, bind
//! library entries to them and let the [`window`] drive one cooperative
//! update/render loop.
//!
//! # Architecture
//!
//! The crate is organized around a single-threaded frame loop:
//!
//! ```text
//!   host time ──► FrameClock::tick() ──► delta ms
//!                                          │
//!                 ┌────────────────────────┘
//!                 ▼
//!   ComponentTree::update() ──► animations advance, callbacks fire
//!                 │
//!                 ▼
//!   ComponentTree::evaluate() ──► FrameChanges ──► Renderer::apply()
//!                 │
//!                 ▼
//!   ComponentTree::render() ──► Behavior::render() ──► Renderer draw calls
//! ```
//!
//! **[`component`]** — Struct-of-arrays component tree with generational
//! handles. Layout setters invalidate a cached local transform and mark the
//! appropriate dirty channel; [`Behavior`](component::Behavior) objects give
//! each component its specialized rendering and theming.
//!
//! **[`animation`]** — The [`Animation`](animation::Animation) trait, the
//! per-slot [`AnimationController`](animation::AnimationController) and a few
//! built-in animations.
//!
//! **[`dirty`]** — Multi-channel dirty tracking via `understory_dirty`.
//!
//! **[`theme`]** — Queryable theme description loaded from TOML.
//!
//! **[`settings`]** — Explicitly passed configuration snapshot.
//!
//! **[`render`]** — The [`Renderer`](render::Renderer) trait that drawing
//! backends implement.
//!
//! **[`components`]** — Built-in component behaviors (text).
//!
//! **[`help`]** — Themeable help-prompt style.
//!
//! **[`window`]** — GUI stack and frame loop.
//!
//! **[`time`]** / **[`clock`]** — Host time types and the frame clock that
//! turns them into millisecond deltas.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! **[`transform`]** — 3D affine transform type for component positioning.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site) and animation lifecycle recording.
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-component
//!   change events.

pub mod animation;
pub mod clock;
pub mod component;
pub mod components;
pub mod dirty;
pub mod help;
pub mod render;
pub mod settings;
pub mod theme;
pub mod time;
pub mod trace;
pub mod transform;
pub mod window;
