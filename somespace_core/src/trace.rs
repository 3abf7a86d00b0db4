// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! host loops call at each stage of a frame: tick, animate (scheduler tick),
//! render, present. All method bodies default to no-ops, so implementing only
//! the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`FrameSummaryBuilder`] is a convenience helper that collects phase
//! timestamps and counters during a frame and produces a [`FrameSummary`] at
//! the end.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::scheduler::TickReport;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which phase of the frame loop is being measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Running scheduled animation tasks.
    Animate,
    /// Painting the scene into a surface.
    Render,
    /// Handing the surface to the host (canvas blit, file write, ...).
    Present,
}

impl PhaseKind {
    /// Every phase, in frame order.
    pub const ALL: [Self; 3] = [Self::Animate, Self::Render, Self::Present];

    /// Short lowercase name, used by text and JSON sinks.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Animate => "animate",
            Self::Render => "render",
            Self::Present => "present",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Animate => 0,
            Self::Render => 1,
            Self::Present => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the host's frame callback fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTickEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Host time of the callback.
    pub now: HostTime,
    /// Time since the previous frame callback, if there was one.
    pub interval: Option<Duration>,
}

/// Marks the beginning of a frame-loop phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseBeginEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is starting.
    pub phase: PhaseKind,
    /// Host time at the start of the phase.
    pub timestamp: HostTime,
}

/// Marks the end of a frame-loop phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseEndEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is ending.
    pub phase: PhaseKind,
    /// Host time at the end of the phase.
    pub timestamp: HostTime,
}

/// Emitted after the scheduler ran its tasks for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerTickEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Callbacks invoked.
    pub ran: u32,
    /// Tasks that finished naturally.
    pub finished: u32,
    /// Tasks dropped after cancellation.
    pub cancelled: u32,
    /// Tasks still scheduled.
    pub live: u32,
}

impl SchedulerTickEvent {
    /// Creates an event from a scheduler [`TickReport`].
    #[must_use]
    pub fn new(frame_index: u64, report: &TickReport) -> Self {
        Self {
            frame_index,
            ran: report.ran,
            finished: report.finished,
            cancelled: report.cancelled,
            live: report.live,
        }
    }
}

/// Emitted after a scene render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStatsEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Entities painted.
    pub drawn: u32,
    /// Entities skipped by viewport culling.
    pub culled: u32,
    /// Filter halos painted.
    pub halos: u32,
}

/// Per-frame summary produced by [`FrameSummaryBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSummary {
    /// Frame counter.
    pub frame_index: u64,
    /// Host time of the frame callback.
    pub now: HostTime,
    /// Time since the previous frame callback, if known.
    pub interval: Option<Duration>,
    /// Animate phase duration (zero if not measured).
    pub animate: Duration,
    /// Render phase duration (zero if not measured).
    pub render: Duration,
    /// Present phase duration (zero if not measured).
    pub present: Duration,
    /// Scheduler tasks still live after this frame.
    pub live_tasks: u32,
    /// Entities painted.
    pub drawn: u32,
    /// Entities culled.
    pub culled: u32,
}

impl FrameSummary {
    /// Sum of all measured phase durations.
    #[must_use]
    pub fn busy(&self) -> Duration {
        self.animate + self.render + self.present
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the frame loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a frame callback fires.
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
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

    /// Called after the scheduler ran its tasks.
    fn on_scheduler_tick(&mut self, e: &SchedulerTickEvent) {
        _ = e;
    }

    /// Called after the scene was rendered.
    fn on_render_stats(&mut self, e: &RenderStatsEvent) {
        _ = e;
    }

    /// Called with a per-frame summary.
    fn on_frame_summary(&mut self, s: &FrameSummary) {
        _ = s;
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

/// Dispatches one event to the sink when tracing is compiled in.
macro_rules! dispatch {
    ($self:ident, $method:ident, $e:expr) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    }};
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

    /// Emits a [`FrameTickEvent`].
    #[inline]
    pub fn frame_tick(&mut self, e: &FrameTickEvent) {
        dispatch!(self, on_frame_tick, e);
    }

    /// Emits a [`PhaseBeginEvent`].
    #[inline]
    pub fn phase_begin(&mut self, e: &PhaseBeginEvent) {
        dispatch!(self, on_phase_begin, e);
    }

    /// Emits a [`PhaseEndEvent`].
    #[inline]
    pub fn phase_end(&mut self, e: &PhaseEndEvent) {
        dispatch!(self, on_phase_end, e);
    }

    /// Emits a [`SchedulerTickEvent`].
    #[inline]
    pub fn scheduler_tick(&mut self, e: &SchedulerTickEvent) {
        dispatch!(self, on_scheduler_tick, e);
    }

    /// Emits a [`RenderStatsEvent`].
    #[inline]
    pub fn render_stats(&mut self, e: &RenderStatsEvent) {
        dispatch!(self, on_render_stats, e);
    }

    /// Emits a [`FrameSummary`].
    #[inline]
    pub fn frame_summary(&mut self, s: &FrameSummary) {
        dispatch!(self, on_frame_summary, s);
    }
}

// ---------------------------------------------------------------------------
// FrameSummaryBuilder
// ---------------------------------------------------------------------------

/// Collects phase timestamps and counters during a frame and produces a
/// [`FrameSummary`].
#[derive(Debug)]
pub struct FrameSummaryBuilder {
    tick: FrameTickEvent,
    phase_starts: [Option<HostTime>; 3],
    phase_ends: [Option<HostTime>; 3],
    live_tasks: u32,
    drawn: u32,
    culled: u32,
}

impl FrameSummaryBuilder {
    /// Starts building a summary for the given tick.
    #[must_use]
    pub fn new(tick: &FrameTickEvent) -> Self {
        Self {
            tick: *tick,
            phase_starts: [None; 3],
            phase_ends: [None; 3],
            live_tasks: 0,
            drawn: 0,
            culled: 0,
        }
    }

    /// Records the start of a phase.
    pub fn phase_begin(&mut self, phase: PhaseKind, t: HostTime) {
        self.phase_starts[phase.index()] = Some(t);
    }

    /// Records the end of a phase.
    pub fn phase_end(&mut self, phase: PhaseKind, t: HostTime) {
        self.phase_ends[phase.index()] = Some(t);
    }

    /// Records scheduler counters.
    pub fn scheduler(&mut self, e: &SchedulerTickEvent) {
        self.live_tasks = e.live;
    }

    /// Records render counters.
    pub fn render_stats(&mut self, e: &RenderStatsEvent) {
        self.drawn = e.drawn;
        self.culled = e.culled;
    }

    /// Consumes the builder and produces the final [`FrameSummary`].
    #[must_use]
    pub fn finish(self) -> FrameSummary {
        FrameSummary {
            frame_index: self.tick.frame_index,
            now: self.tick.now,
            interval: self.tick.interval,
            animate: self.phase_duration(PhaseKind::Animate),
            render: self.phase_duration(PhaseKind::Render),
            present: self.phase_duration(PhaseKind::Present),
            live_tasks: self.live_tasks,
            drawn: self.drawn,
            culled: self.culled,
        }
    }

    fn phase_duration(&self, phase: PhaseKind) -> Duration {
        let idx = phase.index();
        match (self.phase_starts[idx], self.phase_ends[idx]) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tick() -> FrameTickEvent {
        FrameTickEvent {
            frame_index: 42,
            now: HostTime(1_000_000),
            interval: Some(Duration(16_667)),
        }
    }

    #[test]
    fn scheduler_event_from_report() {
        let report = TickReport {
            tick_index: 9,
            ran: 4,
            finished: 1,
            cancelled: 2,
            live: 3,
        };
        let evt = SchedulerTickEvent::new(42, &report);
        assert_eq!(evt.frame_index, 42);
        assert_eq!((evt.ran, evt.finished, evt.cancelled, evt.live), (4, 1, 2, 3));
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame_tick(&sample_tick());
        sink.on_render_stats(&RenderStatsEvent::default());
        sink.on_frame_summary(&FrameSummaryBuilder::new(&sample_tick()).finish());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame_tick(&sample_tick());
        tracer.render_stats(&RenderStatsEvent::default());
    }

    #[test]
    fn phase_names_are_distinct() {
        let names = PhaseKind::ALL.map(PhaseKind::name);
        assert_eq!(names, ["animate", "render", "present"]);
    }

    #[test]
    fn summary_builder_computes_durations() {
        let tick = sample_tick();
        let mut builder = FrameSummaryBuilder::new(&tick);

        builder.phase_begin(PhaseKind::Animate, HostTime(1_000_000));
        builder.phase_end(PhaseKind::Animate, HostTime(1_000_100));
        builder.phase_begin(PhaseKind::Render, HostTime(1_000_100));
        builder.phase_end(PhaseKind::Render, HostTime(1_004_100));
        builder.phase_begin(PhaseKind::Present, HostTime(1_004_100));
        builder.phase_end(PhaseKind::Present, HostTime(1_004_350));
        builder.render_stats(&RenderStatsEvent {
            frame_index: 42,
            drawn: 17,
            culled: 5,
            halos: 2,
        });
        builder.scheduler(&SchedulerTickEvent {
            frame_index: 42,
            ran: 2,
            finished: 0,
            cancelled: 0,
            live: 2,
        });

        let summary = builder.finish();
        assert_eq!(summary.animate, Duration(100));
        assert_eq!(summary.render, Duration(4000));
        assert_eq!(summary.present, Duration(250));
        assert_eq!(summary.busy(), Duration(4350));
        assert_eq!((summary.drawn, summary.culled, summary.live_tasks), (17, 5, 2));
        assert_eq!(summary.frame_index, 42);
    }

    #[test]
    fn summary_builder_missing_phases_are_zero() {
        let summary = FrameSummaryBuilder::new(&sample_tick()).finish();
        assert_eq!(summary.animate, Duration::ZERO);
        assert_eq!(summary.render, Duration::ZERO);
        assert_eq!(summary.present, Duration::ZERO);
        assert_eq!(summary.interval, Some(Duration(16_667)));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            ticks: Vec<u64>,
            drawn: u32,
        }
        impl TraceSink for RecordingSink {
            fn on_frame_tick(&mut self, e: &FrameTickEvent) {
                self.ticks.push(e.frame_index);
            }
            fn on_render_stats(&mut self, e: &RenderStatsEvent) {
                self.drawn += e.drawn;
            }
        }

        let mut sink = RecordingSink {
            ticks: Vec::new(),
            drawn: 0,
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame_tick(&sample_tick());
        tracer.render_stats(&RenderStatsEvent {
            drawn: 3,
            ..RenderStatsEvent::default()
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.ticks, &[42]);
        assert_eq!(sink.drawn, 3);
    }
}
