// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame clock for the update loop.
//!
//! Components advance their animations by integer millisecond deltas.
//! [`FrameClock`] turns a sequence of [`HostTime`] observations into those
//! deltas, clamping long stalls (window drags, breakpoints, suspended
//! processes) so a single frame cannot skip every running animation to its
//! end.

use crate::time::{HostTime, Timebase};

/// Converts successive host times into clamped millisecond deltas.
#[derive(Clone, Debug)]
pub struct FrameClock {
    timebase: Timebase,
    max_delta_ms: u32,
    last: Option<HostTime>,
    /// Sub-millisecond remainder carried into the next tick.
    carry_nanos: u64,
}

impl FrameClock {
    /// Creates a clock for host times in `timebase`, clamping each delta to
    /// `max_delta_ms`.
    #[must_use]
    pub fn new(timebase: Timebase, max_delta_ms: u32) -> Self {
        Self {
            timebase,
            max_delta_ms,
            last: None,
            carry_nanos: 0,
        }
    }

    /// Returns the timebase host times are interpreted in.
    #[must_use]
    pub fn timebase(&self) -> Timebase {
        self.timebase
    }

    /// Records `now` and returns the milliseconds elapsed since the previous
    /// tick.
    ///
    /// The first tick returns zero. Time running backwards also returns zero.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is clamped to max_delta_ms first"
    )]
    pub fn tick(&mut self, now: HostTime) -> u32 {
        let Some(last) = self.last.replace(now) else {
            return 0;
        };
        let nanos = now.saturating_duration_since(last).to_nanos(self.timebase) + self.carry_nanos;
        let millis = nanos / 1_000_000;
        self.carry_nanos = nanos % 1_000_000;
        if millis > u64::from(self.max_delta_ms) {
            self.carry_nanos = 0;
            return self.max_delta_ms;
        }
        millis as u32
    }

    /// Forgets the previous observation, so the next tick returns zero.
    pub fn reset(&mut self) {
        self.last = None;
        self.carry_nanos = 0;
    }
}
