// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! printed in milliseconds.

use std::io::Write;

use somespace_core::time::{Duration, HostTime};
use somespace_core::trace::{
    FrameSummary, FrameTickEvent, PhaseBeginEvent, PhaseEndEvent, RenderStatsEvent,
    SchedulerTickEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    Duration(t.micros()).as_millis_f64()
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        let _ = match e.interval {
            Some(dt) => writeln!(
                self.writer,
                "[tick] frame={} now={:.3}ms dt={:.3}ms",
                e.frame_index,
                ms(e.now),
                dt.as_millis_f64(),
            ),
            None => writeln!(
                self.writer,
                "[tick] frame={} now={:.3}ms",
                e.frame_index,
                ms(e.now),
            ),
        };
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:begin] frame={} {} at {:.3}ms",
            e.frame_index,
            e.phase.name(),
            ms(e.timestamp),
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:end] frame={} {} at {:.3}ms",
            e.frame_index,
            e.phase.name(),
            ms(e.timestamp),
        );
    }

    fn on_scheduler_tick(&mut self, e: &SchedulerTickEvent) {
        let _ = writeln!(
            self.writer,
            "[sched] frame={} ran={} finished={} cancelled={} live={}",
            e.frame_index, e.ran, e.finished, e.cancelled, e.live,
        );
    }

    fn on_render_stats(&mut self, e: &RenderStatsEvent) {
        let _ = writeln!(
            self.writer,
            "[render] frame={} drawn={} culled={} halos={}",
            e.frame_index, e.drawn, e.culled, e.halos,
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] frame={} animate={:.3}ms render={:.3}ms present={:.3}ms \
             busy={:.3}ms live={} drawn={}",
            s.frame_index,
            s.animate.as_millis_f64(),
            s.render.as_millis_f64(),
            s.present.as_millis_f64(),
            s.busy().as_millis_f64(),
            s.live_tasks,
            s.drawn,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use somespace_core::trace::{PhaseKind, RenderStatsEvent};

    fn output(f: impl FnOnce(&mut PrettyPrintSink<Vec<u8>>)) -> String {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        f(&mut sink);
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_tick() {
        let out = output(|s| {
            s.on_frame_tick(&FrameTickEvent {
                frame_index: 1,
                now: HostTime(1_500),
                interval: Some(Duration(16_667)),
            });
        });
        assert!(out.contains("[tick]"), "got: {out}");
        assert!(out.contains("frame=1"), "got: {out}");
        assert!(out.contains("now=1.500ms"), "got: {out}");
        assert!(out.contains("dt=16.667ms"), "got: {out}");
    }

    #[test]
    fn one_line_per_event() {
        let out = output(|s| {
            s.on_phase_begin(&PhaseBeginEvent {
                frame_index: 2,
                phase: PhaseKind::Animate,
                timestamp: HostTime(0),
            });
            s.on_render_stats(&RenderStatsEvent {
                frame_index: 2,
                drawn: 9,
                culled: 1,
                halos: 9,
            });
        });
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2, "got: {out}");
        assert!(lines[0].contains("animate"), "got: {out}");
        assert_eq!(lines[1], "[render] frame=2 drawn=9 culled=1 halos=9");
    }
}
