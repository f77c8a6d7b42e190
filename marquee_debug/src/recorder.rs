// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Animation events are stored one record per event. Component changes
//! ([`on_component_changes`](TraceSink::on_component_changes)) store only the
//! count.

use marquee_core::time::HostTime;
use marquee_core::trace::{
    AnimationEvent, AnimationEventKind, ComponentChange, FrameBeginEvent, FrameSummary,
    PhaseBeginEvent, PhaseEndEvent, PhaseKind, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FRAME_BEGIN: u8 = 1;
const TAG_PHASE_BEGIN: u8 = 2;
const TAG_PHASE_END: u8 = 3;
const TAG_ANIMATION: u8 = 4;
const TAG_FRAME_SUMMARY: u8 = 5;
const TAG_COMPONENT_CHANGES_COUNT: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_phase(&mut self, p: PhaseKind) {
        self.write_u8(match p {
            PhaseKind::Update => 0,
            PhaseKind::Evaluate => 1,
            PhaseKind::Render => 2,
        });
    }

    fn write_animation_kind(&mut self, k: AnimationEventKind) {
        self.write_u8(match k {
            AnimationEventKind::Started => 0,
            AnimationEventKind::Finished => 1,
            AnimationEventKind::Canceled => 2,
            AnimationEventKind::Replaced => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        self.write_u8(TAG_FRAME_BEGIN);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.ticks());
        self.write_u32(e.delta_ms);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.write_u8(TAG_PHASE_BEGIN);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
        self.write_u64(e.timestamp.ticks());
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.write_u8(TAG_PHASE_END);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
        self.write_u64(e.timestamp.ticks());
    }

    fn on_animation_events(&mut self, frame_index: u64, events: &[AnimationEvent]) {
        for e in events {
            self.write_u8(TAG_ANIMATION);
            self.write_u64(frame_index);
            self.write_u32(e.component_index);
            self.write_u8(e.slot);
            self.write_animation_kind(e.kind);
        }
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.write_u8(TAG_FRAME_SUMMARY);
        self.write_u64(s.frame_index);
        self.write_u64(s.now.ticks());
        self.write_u32(s.delta_ms);
        self.write_u64(s.update_ticks);
        self.write_u64(s.eval_ticks);
        self.write_u64(s.render_ticks);
        self.write_u32(s.rendered);
        self.write_u32(s.animations_finished);
    }

    fn on_component_changes(&mut self, frame_index: u64, changes: &[ComponentChange]) {
        self.write_u8(TAG_COMPONENT_CHANGES_COUNT);
        self.write_u64(frame_index);
        self.write_u32(u32::try_from(changes.len()).unwrap_or(u32::MAX));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`FrameBeginEvent`].
    FrameBegin(FrameBeginEvent),
    /// A [`PhaseBeginEvent`].
    PhaseBegin(PhaseBeginEvent),
    /// A [`PhaseEndEvent`].
    PhaseEnd(PhaseEndEvent),
    /// One [`AnimationEvent`] and the frame it happened in.
    Animation {
        /// Frame counter.
        frame_index: u64,
        /// The event.
        event: AnimationEvent,
    },
    /// A [`FrameSummary`].
    FrameSummary(FrameSummary),
    /// Component-change count for a frame.
    ComponentChangesCount {
        /// Frame counter.
        frame_index: u64,
        /// Number of component changes.
        count: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
///
/// Stops at the first unknown tag or truncated record.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        match self.read_u8()? {
            0 => Some(PhaseKind::Update),
            1 => Some(PhaseKind::Evaluate),
            2 => Some(PhaseKind::Render),
            _ => None,
        }
    }

    fn read_animation_kind(&mut self) -> Option<AnimationEventKind> {
        match self.read_u8()? {
            0 => Some(AnimationEventKind::Started),
            1 => Some(AnimationEventKind::Finished),
            2 => Some(AnimationEventKind::Canceled),
            3 => Some(AnimationEventKind::Replaced),
            _ => None,
        }
    }

    fn decode_frame_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameBegin(FrameBeginEvent {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            delta_ms: self.read_u32()?,
        }))
    }

    fn decode_phase_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseBegin(PhaseBeginEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
            timestamp: HostTime(self.read_u64()?),
        }))
    }

    fn decode_phase_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseEnd(PhaseEndEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
            timestamp: HostTime(self.read_u64()?),
        }))
    }

    fn decode_animation(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let event = AnimationEvent {
            component_index: self.read_u32()?,
            slot: self.read_u8()?,
            kind: self.read_animation_kind()?,
        };
        Some(RecordedEvent::Animation { frame_index, event })
    }

    fn decode_frame_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameSummary(FrameSummary {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            delta_ms: self.read_u32()?,
            update_ticks: self.read_u64()?,
            eval_ticks: self.read_u64()?,
            render_ticks: self.read_u64()?,
            rendered: self.read_u32()?,
            animations_finished: self.read_u32()?,
        }))
    }

    fn decode_component_changes_count(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let count = self.read_u32()?;
        Some(RecordedEvent::ComponentChangesCount { frame_index, count })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_FRAME_BEGIN => self.decode_frame_begin(),
            TAG_PHASE_BEGIN => self.decode_phase_begin(),
            TAG_PHASE_END => self.decode_phase_end(),
            TAG_ANIMATION => self.decode_animation(),
            TAG_FRAME_SUMMARY => self.decode_frame_summary(),
            TAG_COMPONENT_CHANGES_COUNT => self.decode_component_changes_count(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::trace::ComponentField;

    fn sample_summary() -> FrameSummary {
        FrameSummary {
            frame_index: 7,
            now: HostTime(1_000_000),
            delta_ms: 16,
            update_ticks: 100,
            eval_ticks: 400,
            render_ticks: 1500,
            rendered: 12,
            animations_finished: 1,
        }
    }

    #[test]
    fn frame_begin_and_summary_survive_recording() {
        let mut rec = RecorderSink::new();
        rec.on_frame_begin(&FrameBeginEvent {
            frame_index: 7,
            now: HostTime(1_000_000),
            delta_ms: 16,
        });
        rec.on_frame_summary(&sample_summary());

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::FrameBegin(e) => {
                assert_eq!(e.frame_index, 7);
                assert_eq!(e.now, HostTime(1_000_000));
                assert_eq!(e.delta_ms, 16);
            }
            other => panic!("expected FrameBegin, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::FrameSummary(s) => {
                let orig = sample_summary();
                assert_eq!(s.update_ticks, orig.update_ticks);
                assert_eq!(s.eval_ticks, orig.eval_ticks);
                assert_eq!(s.render_ticks, orig.render_ticks);
                assert_eq!(s.rendered, orig.rendered);
                assert_eq!(s.animations_finished, orig.animations_finished);
            }
            other => panic!("expected FrameSummary, got {other:?}"),
        }
    }

    #[test]
    fn animation_batches_expand_to_one_record_each() {
        let mut rec = RecorderSink::new();
        let events = [
            AnimationEvent {
                component_index: 3,
                slot: 0,
                kind: AnimationEventKind::Finished,
            },
            AnimationEvent {
                component_index: 4,
                slot: 2,
                kind: AnimationEventKind::Replaced,
            },
        ];
        rec.on_animation_events(9, &events);

        let decoded: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(decoded.len(), 2);
        for (got, want) in decoded.iter().zip(&events) {
            match got {
                RecordedEvent::Animation { frame_index, event } => {
                    assert_eq!(*frame_index, 9);
                    assert_eq!(event, want);
                }
                other => panic!("expected Animation, got {other:?}"),
            }
        }
    }

    #[test]
    fn phase_events_keep_their_kind() {
        let mut rec = RecorderSink::new();
        for phase in [PhaseKind::Update, PhaseKind::Evaluate, PhaseKind::Render] {
            rec.on_phase_begin(&PhaseBeginEvent {
                frame_index: 5,
                phase,
                timestamp: HostTime(2000),
            });
            rec.on_phase_end(&PhaseEndEvent {
                frame_index: 5,
                phase,
                timestamp: HostTime(3000),
            });
        }

        let phases: Vec<_> = decode(rec.as_bytes())
            .map(|e| match e {
                RecordedEvent::PhaseBegin(b) => (b.phase, true),
                RecordedEvent::PhaseEnd(e) => (e.phase, false),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            phases,
            [
                (PhaseKind::Update, true),
                (PhaseKind::Update, false),
                (PhaseKind::Evaluate, true),
                (PhaseKind::Evaluate, false),
                (PhaseKind::Render, true),
                (PhaseKind::Render, false),
            ]
        );
    }

    #[test]
    fn component_changes_store_the_count() {
        let mut rec = RecorderSink::new();
        let change = |component_index, field| ComponentChange {
            component_index,
            field,
        };
        rec.on_component_changes(
            42,
            &[
                change(0, ComponentField::Transform),
                change(1, ComponentField::Opacity),
            ],
        );

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert!(
            matches!(
                events[..],
                [RecordedEvent::ComponentChangesCount {
                    frame_index: 42,
                    count: 2
                }]
            ),
            "{events:?}"
        );
    }

    #[test]
    fn truncated_and_empty_input_stop_cleanly() {
        assert_eq!(decode(&[]).count(), 0);

        let mut rec = RecorderSink::new();
        rec.on_frame_summary(&sample_summary());
        let bytes = rec.into_bytes();
        assert_eq!(decode(&bytes[..bytes.len() - 1]).count(), 0, "partial record dropped");
        assert_eq!(decode(&[0xFF, 1, 2, 3]).count(), 0, "unknown tag stops decoding");
    }
}
