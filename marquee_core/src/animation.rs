// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven animations attached to component slots.
//!
//! An [`Animation`] maps normalized time `t ∈ [0, 1]` to an effect on the
//! component tree. An [`AnimationController`] owns one animation plus its
//! playback state (start delay, elapsed time, reverse flag, finished
//! callback). Each component has [`MAX_ANIMATIONS`] slots, each holding at
//! most one controller; see
//! [`ComponentTree::set_animation`](crate::component::ComponentTree::set_animation).
//!
//! # Lifecycle
//!
//! ```text
//!   set_animation ──► delay elapses ──► apply(t) every update ──► t = 1
//!        │                                                          │
//!        │ cancel/stop: slot cleared, no callback     slot cleared, callback
//!        │ finish: apply(end), slot cleared, callback
//!        ▼
//!   replaced by a new set_animation: old callback dropped
//! ```

use core::fmt;
use std::cell::Cell;
use std::rc::Rc;

use crate::component::{ComponentId, ComponentTree};
use crate::transform::{Transform3d, Vec3};

/// Number of animation slots per component.
pub const MAX_ANIMATIONS: usize = 4;

/// Callback run once when an animation completes naturally or is finished.
pub type FinishedCallback = Box<dyn FnOnce(&mut ComponentTree)>;

/// A time-driven effect.
pub trait Animation {
    /// Total duration in milliseconds, excluding any start delay.
    fn duration_ms(&self) -> u32;

    /// Applies the effect for normalized time `t` (`0.0..=1.0`) to component
    /// `id`.
    fn apply(&mut self, t: f64, tree: &mut ComponentTree, id: ComponentId);
}

/// Linear interpolation between two scalars.
#[inline]
#[must_use]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Playback state for one animation in one slot.
pub struct AnimationController {
    animation: Box<dyn Animation>,
    /// Elapsed milliseconds; negative while the start delay runs.
    time: i64,
    reverse: bool,
    finished_callback: Option<FinishedCallback>,
}

impl fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationController")
            .field("duration_ms", &self.animation.duration_ms())
            .field("time", &self.time)
            .field("reverse", &self.reverse)
            .field("has_callback", &self.finished_callback.is_some())
            .finish_non_exhaustive()
    }
}

impl AnimationController {
    /// Wraps `animation`, starting after `delay_ms`.
    #[must_use]
    pub fn new(
        animation: Box<dyn Animation>,
        delay_ms: u32,
        finished_callback: Option<FinishedCallback>,
        reverse: bool,
    ) -> Self {
        Self {
            animation,
            time: -i64::from(delay_ms),
            reverse,
            finished_callback,
        }
    }

    /// Advances by `delta_ms` and applies the effect. Returns `true` once the
    /// animation has reached its end.
    ///
    /// Nothing is applied while the start delay is still running.
    pub fn update(&mut self, delta_ms: u32, tree: &mut ComponentTree, id: ComponentId) -> bool {
        self.time += i64::from(delta_ms);
        if self.time < 0 {
            return false;
        }
        let t = self.progress();
        self.animation
            .apply(if self.reverse { 1.0 - t } else { t }, tree, id);
        t >= 1.0
    }

    /// Jumps to the end and applies the final effect.
    pub fn finish(&mut self, tree: &mut ComponentTree, id: ComponentId) {
        let remaining = i64::from(self.animation.duration_ms()) - self.time;
        self.time += remaining.max(0);
        let end = if self.reverse { 0.0 } else { 1.0 };
        self.animation.apply(end, tree, id);
    }

    /// Normalized progress, clamped to `0.0..=1.0`. Zero-length animations
    /// are always complete.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let duration = self.animation.duration_ms();
        if duration == 0 {
            return 1.0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "animation times are far below 2^52 ms"
        )]
        let t = self.time as f64 / f64::from(duration);
        t.clamp(0.0, 1.0)
    }

    /// Elapsed milliseconds; negative while the start delay runs.
    #[must_use]
    pub fn time(&self) -> i64 {
        self.time
    }

    /// Whether the animation plays from `t = 1` back to `t = 0`.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    /// Removes and returns the finished callback.
    pub fn take_finished_callback(&mut self) -> Option<FinishedCallback> {
        self.finished_callback.take()
    }
}

// ---------------------------------------------------------------------------
// Built-in animations
// ---------------------------------------------------------------------------

/// An animation driven by a closure.
pub struct LambdaAnimation {
    func: Box<dyn FnMut(f64, &mut ComponentTree, ComponentId)>,
    duration_ms: u32,
}

impl fmt::Debug for LambdaAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaAnimation")
            .field("duration_ms", &self.duration_ms)
            .finish_non_exhaustive()
    }
}

impl LambdaAnimation {
    /// Creates an animation that calls `func(t, tree, id)` on every update.
    pub fn new(
        func: impl FnMut(f64, &mut ComponentTree, ComponentId) + 'static,
        duration_ms: u32,
    ) -> Self {
        Self {
            func: Box::new(func),
            duration_ms,
        }
    }
}

impl Animation for LambdaAnimation {
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    fn apply(&mut self, t: f64, tree: &mut ComponentTree, id: ComponentId) {
        (self.func)(t, tree, id);
    }
}

/// Fades a component's opacity between two values.
#[derive(Clone, Copy, Debug)]
pub struct FadeAnimation {
    from: u8,
    to: u8,
    duration_ms: u32,
}

impl FadeAnimation {
    /// Fades from `from` to `to` over `duration_ms`.
    #[must_use]
    pub fn new(from: u8, to: u8, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
        }
    }
}

impl Animation for FadeAnimation {
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is rounded and clamped to the u8 range"
    )]
    fn apply(&mut self, t: f64, tree: &mut ComponentTree, id: ComponentId) {
        let value = lerp(f64::from(self.from), f64::from(self.to), t)
            .round()
            .clamp(0.0, 255.0);
        tree.set_opacity(id, value as u8);
    }
}

/// Slides a shared camera transform toward a target translation with a cubic
/// ease-out.
///
/// The camera is not part of the tree; views keep it in an `Rc<Cell<_>>` and
/// use it as the parent transform when rendering.
#[derive(Debug)]
pub struct MoveCameraAnimation {
    camera: Rc<Cell<Transform3d>>,
    start: Transform3d,
    target: Vec3,
}

impl MoveCameraAnimation {
    /// Duration of every camera move.
    pub const DURATION_MS: u32 = 400;

    /// Moves `camera` from its current value so that it ends up translated by
    /// `-target`.
    #[must_use]
    pub fn new(camera: Rc<Cell<Transform3d>>, target: Vec3) -> Self {
        let start = camera.get();
        Self {
            camera,
            start,
            target,
        }
    }
}

impl Animation for MoveCameraAnimation {
    fn duration_ms(&self) -> u32 {
        Self::DURATION_MS
    }

    fn apply(&mut self, t: f64, _tree: &mut ComponentTree, _id: ComponentId) {
        let t = t - 1.0;
        let eased = t * t * t + 1.0;
        let translation = -(-self.start.translation()).lerp(self.target, eased);
        self.camera.set(self.camera.get().with_translation(translation));
    }
}
