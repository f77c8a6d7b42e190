// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] writes one line per event to any [`Write`]r. Write
//! errors are counted rather than returned, since [`TraceSink`] methods
//! cannot fail.

use std::io::Write;

use marquee_core::time::Timebase;
use marquee_core::trace::{
    AnimationEvent, ComponentChange, FrameBeginEvent, FrameSummary, PhaseBeginEvent,
    PhaseEndEvent, TraceSink,
};

/// A [`TraceSink`] that prints each event on its own line.
#[derive(Debug)]
pub struct PrettyPrintSink<W> {
    out: W,
    timebase: Timebase,
    write_errors: u64,
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink writing to `out`, converting ticks with `timebase`.
    pub fn new(out: W, timebase: Timebase) -> Self {
        Self {
            out,
            timebase,
            write_errors: 0,
        }
    }

    /// Number of lines that failed to write.
    #[must_use]
    pub fn write_errors(&self) -> u64 {
        self.write_errors
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: core::fmt::Arguments<'_>) {
        if writeln!(self.out, "{args}").is_err() {
            self.write_errors += 1;
        }
    }

    fn us(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1000.0
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        self.line(format_args!(
            "[frame {}] begin now={} delta={}ms",
            e.frame_index,
            e.now.ticks(),
            e.delta_ms
        ));
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.line(format_args!(
            "[frame {}]   {:?} begin @{}",
            e.frame_index,
            e.phase,
            e.timestamp.ticks()
        ));
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.line(format_args!(
            "[frame {}]   {:?} end @{}",
            e.frame_index,
            e.phase,
            e.timestamp.ticks()
        ));
    }

    fn on_animation_events(&mut self, frame_index: u64, events: &[AnimationEvent]) {
        for e in events {
            self.line(format_args!(
                "[frame {frame_index}]   animation {:?} component={} slot={}",
                e.kind, e.component_index, e.slot
            ));
        }
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let (update, eval, render) = (
            self.us(s.update_ticks),
            self.us(s.eval_ticks),
            self.us(s.render_ticks),
        );
        self.line(format_args!(
            "[frame {}] summary update={update:.1}us eval={eval:.1}us render={render:.1}us \
             rendered={} finished={}",
            s.frame_index, s.rendered, s.animations_finished
        ));
    }

    fn on_component_changes(&mut self, frame_index: u64, changes: &[ComponentChange]) {
        self.line(format_args!(
            "[frame {frame_index}]   {} component changes",
            changes.len()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::time::HostTime;
    use marquee_core::trace::{AnimationEventKind, PhaseKind};

    fn printed(f: impl FnOnce(&mut PrettyPrintSink<Vec<u8>>)) -> String {
        let mut sink = PrettyPrintSink::new(Vec::new(), Timebase::NANOS);
        f(&mut sink);
        assert_eq!(sink.write_errors(), 0);
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn one_line_per_event() {
        let text = printed(|sink| {
            sink.on_frame_begin(&FrameBeginEvent {
                frame_index: 3,
                now: HostTime(500),
                delta_ms: 16,
            });
            sink.on_phase_begin(&PhaseBeginEvent {
                frame_index: 3,
                phase: PhaseKind::Update,
                timestamp: HostTime(500),
            });
            sink.on_animation_events(
                3,
                &[AnimationEvent {
                    component_index: 1,
                    slot: 0,
                    kind: AnimationEventKind::Finished,
                }],
            );
        });
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "[frame 3] begin now=500 delta=16ms",
                "[frame 3]   Update begin @500",
                "[frame 3]   animation Finished component=1 slot=0",
            ]
        );
    }

    #[test]
    fn summary_reports_microseconds() {
        let text = printed(|sink| {
            sink.on_frame_summary(&FrameSummary {
                frame_index: 1,
                now: HostTime(0),
                delta_ms: 16,
                update_ticks: 1500,
                eval_ticks: 0,
                render_ticks: 300,
                rendered: 4,
                animations_finished: 0,
            });
        });
        assert_eq!(
            text.trim_end(),
            "[frame 1] summary update=1.5us eval=0.0us render=0.3us rendered=4 finished=0"
        );
    }

    #[test]
    fn write_failures_are_counted() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let mut sink = PrettyPrintSink::new(Broken, Timebase::NANOS);
        sink.on_component_changes(0, &[]);
        sink.on_component_changes(1, &[]);
        assert_eq!(sink.write_errors(), 2);
    }
}
