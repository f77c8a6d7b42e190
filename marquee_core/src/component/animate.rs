// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation slot management.
//!
//! Slot indices must be below [`MAX_ANIMATIONS`]; this is checked with
//! `debug_assert!` and an out-of-range slot panics on the array index in
//! release builds.
//!
//! While an animation applies, its controller is held outside the slot. Slot
//! operations issued from inside `apply` against that same slot are recorded
//! as a [`SlotRequest`] and carried out once `apply` returns.

use crate::animation::{Animation, AnimationController, FinishedCallback, MAX_ANIMATIONS};
use crate::trace::AnimationEventKind;

use super::id::ComponentId;
use super::store::ComponentTree;

/// What to do with an in-flight controller once it has applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SlotRequest {
    /// Put it back in its slot unless it completed.
    Keep,
    /// Drop it without running its callback.
    Drop,
    /// Skip to its end and run its callback.
    Finish,
}

/// A slot whose controller is currently applying.
#[derive(Debug)]
pub(crate) struct InFlight {
    idx: u32,
    slot: usize,
    request: SlotRequest,
}

impl ComponentTree {
    /// Installs `animation` in `slot`, starting after `delay_ms`.
    ///
    /// A running animation in the slot is replaced and its callback is
    /// dropped without running.
    pub fn set_animation(
        &mut self,
        id: ComponentId,
        animation: impl Animation + 'static,
        delay_ms: u32,
        finished_callback: Option<FinishedCallback>,
        reverse: bool,
        slot: usize,
    ) {
        self.validate(id);
        debug_assert!(slot < MAX_ANIMATIONS, "animation slot {slot} out of range");
        let controller =
            AnimationController::new(Box::new(animation), delay_ms, finished_callback, reverse);
        let old = self.animations[id.idx as usize][slot].replace(controller);
        let replaced_in_flight = self.request_in_flight(id.idx, slot, SlotRequest::Drop);
        let kind = if old.is_some() || replaced_in_flight {
            AnimationEventKind::Replaced
        } else {
            AnimationEventKind::Started
        };
        self.record_animation(id.idx, slot, kind);
    }

    /// Removes the animation in `slot` without running its callback, leaving
    /// the component in its current state.
    ///
    /// Returns `true` if the slot was occupied.
    pub fn cancel_animation(&mut self, id: ComponentId, slot: usize) -> bool {
        self.validate(id);
        debug_assert!(slot < MAX_ANIMATIONS, "animation slot {slot} out of range");
        if self.animations[id.idx as usize][slot].take().is_some()
            || self.request_in_flight(id.idx, slot, SlotRequest::Drop)
        {
            self.record_animation(id.idx, slot, AnimationEventKind::Canceled);
            true
        } else {
            false
        }
    }

    /// Same as [`cancel_animation`](Self::cancel_animation).
    pub fn stop_animation(&mut self, id: ComponentId, slot: usize) -> bool {
        self.cancel_animation(id, slot)
    }

    /// Skips the animation in `slot` to its end: applies the final value,
    /// clears the slot, then runs the callback.
    ///
    /// Called from the slot's own `apply`, the skip happens once `apply`
    /// returns. Returns `true` if the slot was occupied.
    pub fn finish_animation(&mut self, id: ComponentId, slot: usize) -> bool {
        self.validate(id);
        debug_assert!(slot < MAX_ANIMATIONS, "animation slot {slot} out of range");
        let Some(mut controller) = self.animations[id.idx as usize][slot].take() else {
            return self.request_in_flight(id.idx, slot, SlotRequest::Finish);
        };
        self.begin_in_flight(id.idx, slot);
        controller.finish(self, id);
        let request = self.end_in_flight();
        if self.is_alive(id) && request != SlotRequest::Drop {
            self.complete(id, slot, controller);
        }
        true
    }

    /// Advances the animation in `slot` by `delta_ms`.
    ///
    /// When the animation reaches its end the slot is cleared and the
    /// callback runs exactly once. Returns `true` if the slot was occupied.
    pub fn advance_animation(&mut self, id: ComponentId, slot: usize, delta_ms: u32) -> bool {
        self.validate(id);
        debug_assert!(slot < MAX_ANIMATIONS, "animation slot {slot} out of range");
        let Some(mut controller) = self.animations[id.idx as usize][slot].take() else {
            return false;
        };
        self.begin_in_flight(id.idx, slot);
        let done = controller.update(delta_ms, self, id);
        let request = self.end_in_flight();
        if !self.is_alive(id) {
            // The animation destroyed its own component.
            return true;
        }
        match request {
            SlotRequest::Drop => {}
            SlotRequest::Finish => {
                if !done {
                    controller.finish(self, id);
                }
                self.complete(id, slot, controller);
            }
            SlotRequest::Keep if done => self.complete(id, slot, controller),
            SlotRequest::Keep => self.animations[id.idx as usize][slot] = Some(controller),
        }
        true
    }

    /// Returns whether `slot` holds an animation.
    #[must_use]
    pub fn is_animation_playing(&self, id: ComponentId, slot: usize) -> bool {
        self.validate(id);
        debug_assert!(slot < MAX_ANIMATIONS, "animation slot {slot} out of range");
        self.animations[id.idx as usize][slot].is_some()
            || self
                .in_flight
                .iter()
                .any(|f| f.idx == id.idx && f.slot == slot && f.request == SlotRequest::Keep)
    }

    /// Returns whether the animation in `slot` plays in reverse. Empty slots
    /// report `false`.
    #[must_use]
    pub fn is_animation_reversed(&self, id: ComponentId, slot: usize) -> bool {
        self.validate(id);
        debug_assert!(slot < MAX_ANIMATIONS, "animation slot {slot} out of range");
        self.animations[id.idx as usize][slot]
            .as_ref()
            .is_some_and(AnimationController::is_reversed)
    }

    /// Returns the elapsed time of the animation in `slot`, negative while its
    /// delay runs. Empty slots report `0`.
    #[must_use]
    pub fn animation_time(&self, id: ComponentId, slot: usize) -> i64 {
        self.validate(id);
        debug_assert!(slot < MAX_ANIMATIONS, "animation slot {slot} out of range");
        self.animations[id.idx as usize][slot]
            .as_ref()
            .map_or(0, AnimationController::time)
    }

    /// Cancels every slot of `id`. Callbacks do not run.
    pub fn cancel_all_animations(&mut self, id: ComponentId) {
        for slot in 0..MAX_ANIMATIONS {
            self.cancel_animation(id, slot);
        }
    }

    /// Same as [`cancel_all_animations`](Self::cancel_all_animations).
    pub fn stop_all_animations(&mut self, id: ComponentId) {
        self.cancel_all_animations(id);
    }

    /// Moves the recorded animation lifecycle events into `out`.
    ///
    /// Events are only recorded with the `trace` feature; otherwise this does
    /// nothing.
    pub fn drain_animation_events(&mut self, out: &mut Vec<crate::trace::AnimationEvent>) {
        #[cfg(feature = "trace")]
        out.append(&mut self.animation_events);
        #[cfg(not(feature = "trace"))]
        {
            _ = out;
        }
    }

    // -- Internal helpers --

    fn begin_in_flight(&mut self, idx: u32, slot: usize) {
        self.in_flight.push(InFlight {
            idx,
            slot,
            request: SlotRequest::Keep,
        });
    }

    fn end_in_flight(&mut self) -> SlotRequest {
        self.in_flight
            .pop()
            .map_or(SlotRequest::Keep, |f| f.request)
    }

    /// Records `request` against the in-flight controller of `slot`, if any.
    /// A dropped controller stays dropped.
    fn request_in_flight(&mut self, idx: u32, slot: usize, request: SlotRequest) -> bool {
        let Some(f) = self
            .in_flight
            .iter_mut()
            .rev()
            .find(|f| f.idx == idx && f.slot == slot && f.request != SlotRequest::Drop)
        else {
            return false;
        };
        f.request = request;
        true
    }

    /// Runs the callback of a controller that has already left its slot.
    fn complete(&mut self, id: ComponentId, slot: usize, mut controller: AnimationController) {
        self.record_animation(id.idx, slot, AnimationEventKind::Finished);
        if let Some(callback) = controller.take_finished_callback() {
            callback(self);
        }
    }

    fn record_animation(&mut self, idx: u32, slot: usize, kind: AnimationEventKind) {
        #[cfg(feature = "trace")]
        self.animation_events.push(crate::trace::AnimationEvent {
            component_index: idx,
            slot: u8::try_from(slot).unwrap_or(u8::MAX),
            kind,
        });
        #[cfg(not(feature = "trace"))]
        {
            _ = (idx, slot, kind);
        }
    }
}
