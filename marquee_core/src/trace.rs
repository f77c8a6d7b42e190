// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! frame-loop instrumentation calls at each stage. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`FrameSummaryBuilder`] is a convenience helper that collects phase
//! timestamps during a frame and produces a [`FrameSummary`] at the end.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call) and
//!   makes the component tree record [`AnimationEvent`]s.
//! - `trace-rich` (implies `trace`) gates [`ComponentChange`] events plus the
//!   corresponding `TraceSink` method.

use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which phase of the frame loop is being measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Animation and behavior updates.
    Update,
    /// Component tree evaluation (dirty drain, change collection).
    Evaluate,
    /// Drawing the GUI stack.
    Render,
}

/// What happened to an animation slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationEventKind {
    /// An animation was installed into an empty slot.
    Started,
    /// An animation reached its end and its callback (if any) ran.
    Finished,
    /// An animation was removed before completion without running its
    /// callback.
    Canceled,
    /// An animation was installed over a running one; the old one's callback
    /// was dropped.
    Replaced,
}

/// Which property of a component changed.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentField {
    /// Position, origin, size, rotation or scale.
    Transform,
    /// Opacity value.
    Opacity,
    /// Parent/child relationships or draw order.
    Topology,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the window starts a frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameBeginEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Host time observed for this frame.
    pub now: HostTime,
    /// Milliseconds handed to the update pass.
    pub delta_ms: u32,
}

/// Marks the beginning of a frame-loop phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseBeginEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is starting.
    pub phase: PhaseKind,
    /// Host time at the start of the phase.
    pub timestamp: HostTime,
}

/// Marks the end of a frame-loop phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseEndEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is ending.
    pub phase: PhaseKind,
    /// Host time at the end of the phase.
    pub timestamp: HostTime,
}

/// A lifecycle change of one animation slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationEvent {
    /// Slot index of the component in its tree.
    pub component_index: u32,
    /// Animation slot (`0..4`).
    pub slot: u8,
    /// What happened.
    pub kind: AnimationEventKind,
}

/// Per-frame timing summary produced by [`FrameSummaryBuilder`].
#[derive(Clone, Copy, Debug)]
pub struct FrameSummary {
    /// Frame counter.
    pub frame_index: u64,
    /// Host time observed for this frame.
    pub now: HostTime,
    /// Milliseconds handed to the update pass.
    pub delta_ms: u32,
    /// Update phase duration in ticks (0 if not measured).
    pub update_ticks: u64,
    /// Evaluate phase duration in ticks (0 if not measured).
    pub eval_ticks: u64,
    /// Render phase duration in ticks (0 if not measured).
    pub render_ticks: u64,
    /// Number of components drawn.
    pub rendered: u32,
    /// Number of animations that finished this frame.
    pub animations_finished: u32,
}

/// A per-frame component change record.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct ComponentChange {
    /// Slot index of the component that changed.
    pub component_index: u32,
    /// Which field changed.
    pub field: ComponentField,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the frame loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a frame starts.
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        _ = e;
    }

    /// Called at the beginning of a frame-loop phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a frame-loop phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called with the animation lifecycle events recorded during a frame.
    fn on_animation_events(&mut self, frame_index: u64, events: &[AnimationEvent]) {
        _ = (frame_index, events);
    }

    /// Called with a per-frame timing summary.
    fn on_frame_summary(&mut self, s: &FrameSummary) {
        _ = s;
    }

    /// Called with per-frame component changes (requires `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    fn on_component_changes(&mut self, frame_index: u64, changes: &[ComponentChange]) {
        _ = (frame_index, changes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Returns whether events reach a sink.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits a [`FrameBeginEvent`].
    #[inline]
    pub fn frame_begin(&mut self, e: &FrameBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseBeginEvent`].
    #[inline]
    pub fn phase_begin(&mut self, e: &PhaseBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseEndEvent`].
    #[inline]
    pub fn phase_end(&mut self, e: &PhaseEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a batch of [`AnimationEvent`]s. Empty batches are skipped.
    #[inline]
    pub fn animation_events(&mut self, frame_index: u64, events: &[AnimationEvent]) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink
            && !events.is_empty()
        {
            s.on_animation_events(frame_index, events);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (frame_index, events);
        }
    }

    /// Emits a [`FrameSummary`].
    #[inline]
    pub fn frame_summary(&mut self, s: &FrameSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_frame_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits component changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn component_changes(&mut self, frame_index: u64, changes: &[ComponentChange]) {
        if let Some(s) = &mut self.sink {
            s.on_component_changes(frame_index, changes);
        }
    }
}

// ---------------------------------------------------------------------------
// FrameSummaryBuilder
// ---------------------------------------------------------------------------

/// Collects phase timestamps during a frame and produces a [`FrameSummary`].
#[derive(Debug)]
pub struct FrameSummaryBuilder {
    begin: FrameBeginEvent,
    phase_starts: [Option<HostTime>; 3],
    phase_ends: [Option<HostTime>; 3],
    rendered: u32,
    animations_finished: u32,
}

impl FrameSummaryBuilder {
    /// Starts building a summary for the given frame.
    #[must_use]
    pub fn new(begin: &FrameBeginEvent) -> Self {
        Self {
            begin: *begin,
            phase_starts: [None; 3],
            phase_ends: [None; 3],
            rendered: 0,
            animations_finished: 0,
        }
    }

    /// Records the start of a phase.
    pub fn phase_begin(&mut self, phase: PhaseKind, t: HostTime) {
        self.phase_starts[phase_index(phase)] = Some(t);
    }

    /// Records the end of a phase.
    pub fn phase_end(&mut self, phase: PhaseKind, t: HostTime) {
        self.phase_ends[phase_index(phase)] = Some(t);
    }

    /// Sets the number of components drawn.
    pub fn set_rendered(&mut self, rendered: u32) {
        self.rendered = rendered;
    }

    /// Counts the finished animations among `events`.
    pub fn record_animations(&mut self, events: &[AnimationEvent]) {
        let finished = events
            .iter()
            .filter(|e| e.kind == AnimationEventKind::Finished)
            .count();
        self.animations_finished += u32::try_from(finished).unwrap_or(u32::MAX);
    }

    /// Consumes the builder and produces the final [`FrameSummary`].
    #[must_use]
    pub fn finish(self) -> FrameSummary {
        FrameSummary {
            frame_index: self.begin.frame_index,
            now: self.begin.now,
            delta_ms: self.begin.delta_ms,
            update_ticks: self.phase_duration(PhaseKind::Update),
            eval_ticks: self.phase_duration(PhaseKind::Evaluate),
            render_ticks: self.phase_duration(PhaseKind::Render),
            rendered: self.rendered,
            animations_finished: self.animations_finished,
        }
    }

    fn phase_duration(&self, phase: PhaseKind) -> u64 {
        let idx = phase_index(phase);
        match (self.phase_starts[idx], self.phase_ends[idx]) {
            (Some(start), Some(end)) => end.saturating_duration_since(start).ticks(),
            _ => 0,
        }
    }
}

/// Maps a [`PhaseKind`] to an array index.
const fn phase_index(phase: PhaseKind) -> usize {
    match phase {
        PhaseKind::Update => 0,
        PhaseKind::Evaluate => 1,
        PhaseKind::Render => 2,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_begin() -> FrameBeginEvent {
        FrameBeginEvent {
            frame_index: 42,
            now: HostTime(1_000_000),
            delta_ms: 16,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame_begin(&sample_begin());
        sink.on_animation_events(
            0,
            &[AnimationEvent {
                component_index: 0,
                slot: 0,
                kind: AnimationEventKind::Started,
            }],
        );
        sink.on_frame_summary(&FrameSummaryBuilder::new(&sample_begin()).finish());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        assert!(!tracer.is_active());
        tracer.frame_begin(&sample_begin());
        tracer.animation_events(42, &[]);
    }

    #[test]
    fn summary_builder_computes_durations() {
        let mut builder = FrameSummaryBuilder::new(&sample_begin());

        builder.phase_begin(PhaseKind::Update, HostTime(1_000_000));
        builder.phase_end(PhaseKind::Update, HostTime(1_000_100));
        builder.phase_begin(PhaseKind::Evaluate, HostTime(1_000_100));
        builder.phase_end(PhaseKind::Evaluate, HostTime(1_000_500));
        builder.phase_begin(PhaseKind::Render, HostTime(1_000_500));
        builder.phase_end(PhaseKind::Render, HostTime(1_002_000));
        builder.set_rendered(7);

        let summary = builder.finish();
        assert_eq!(summary.update_ticks, 100);
        assert_eq!(summary.eval_ticks, 400);
        assert_eq!(summary.render_ticks, 1500);
        assert_eq!(summary.rendered, 7);
        assert_eq!(summary.frame_index, 42);
        assert_eq!(summary.delta_ms, 16);
    }

    #[test]
    fn summary_builder_missing_phases_are_zero() {
        let summary = FrameSummaryBuilder::new(&sample_begin()).finish();
        assert_eq!(summary.update_ticks, 0);
        assert_eq!(summary.eval_ticks, 0);
        assert_eq!(summary.render_ticks, 0);
        assert_eq!(summary.animations_finished, 0);
    }

    #[test]
    fn summary_builder_counts_finished_animations() {
        let mut builder = FrameSummaryBuilder::new(&sample_begin());
        let event = |kind| AnimationEvent {
            component_index: 3,
            slot: 1,
            kind,
        };
        builder.record_animations(&[
            event(AnimationEventKind::Started),
            event(AnimationEventKind::Finished),
            event(AnimationEventKind::Canceled),
            event(AnimationEventKind::Finished),
        ]);
        assert_eq!(builder.finish().animations_finished, 2);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        struct RecordingSink {
            frames: Vec<u64>,
            animations: usize,
        }
        impl TraceSink for RecordingSink {
            fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
                self.frames.push(e.frame_index);
            }
            fn on_animation_events(&mut self, _frame_index: u64, events: &[AnimationEvent]) {
                self.animations += events.len();
            }
        }

        let mut sink = RecordingSink {
            frames: Vec::new(),
            animations: 0,
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame_begin(&sample_begin());
        tracer.animation_events(42, &[]);
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
        assert_eq!(sink.animations, 0, "empty batches are not dispatched");
    }
}
