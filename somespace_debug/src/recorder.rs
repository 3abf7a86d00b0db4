// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as tagged, fixed-size little-endian records. [`decode`] reads
//! them back as an iterator of [`RecordedEvent`]. A truncated or unknown
//! record ends the iteration.

use somespace_core::time::{Duration, HostTime};
use somespace_core::trace::{
    FrameSummary, FrameTickEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind, RenderStatsEvent,
    SchedulerTickEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FRAME_TICK: u8 = 1;
const TAG_PHASE_BEGIN: u8 = 2;
const TAG_PHASE_END: u8 = 3;
const TAG_SCHEDULER_TICK: u8 = 4;
const TAG_RENDER_STATS: u8 = 5;
const TAG_FRAME_SUMMARY: u8 = 6;

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

    fn write_option_u64(&mut self, v: Option<u64>) {
        self.write_u8(u8::from(v.is_some()));
        self.write_u64(v.unwrap_or(0));
    }

    fn write_phase(&mut self, p: PhaseKind) {
        self.write_u8(match p {
            PhaseKind::Animate => 0,
            PhaseKind::Render => 1,
            PhaseKind::Present => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        self.write_u8(TAG_FRAME_TICK);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.micros());
        self.write_option_u64(e.interval.map(Duration::micros));
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.write_u8(TAG_PHASE_BEGIN);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
        self.write_u64(e.timestamp.micros());
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.write_u8(TAG_PHASE_END);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
        self.write_u64(e.timestamp.micros());
    }

    fn on_scheduler_tick(&mut self, e: &SchedulerTickEvent) {
        self.write_u8(TAG_SCHEDULER_TICK);
        self.write_u64(e.frame_index);
        self.write_u32(e.ran);
        self.write_u32(e.finished);
        self.write_u32(e.cancelled);
        self.write_u32(e.live);
    }

    fn on_render_stats(&mut self, e: &RenderStatsEvent) {
        self.write_u8(TAG_RENDER_STATS);
        self.write_u64(e.frame_index);
        self.write_u32(e.drawn);
        self.write_u32(e.culled);
        self.write_u32(e.halos);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.write_u8(TAG_FRAME_SUMMARY);
        self.write_u64(s.frame_index);
        self.write_u64(s.now.micros());
        self.write_option_u64(s.interval.map(Duration::micros));
        self.write_u64(s.animate.micros());
        self.write_u64(s.render.micros());
        self.write_u64(s.present.micros());
        self.write_u32(s.live_tasks);
        self.write_u32(s.drawn);
        self.write_u32(s.culled);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`FrameTickEvent`].
    FrameTick(FrameTickEvent),
    /// A [`PhaseBeginEvent`].
    PhaseBegin(PhaseBeginEvent),
    /// A [`PhaseEndEvent`].
    PhaseEnd(PhaseEndEvent),
    /// A [`SchedulerTickEvent`].
    SchedulerTick(SchedulerTickEvent),
    /// A [`RenderStatsEvent`].
    RenderStats(RenderStatsEvent),
    /// A [`FrameSummary`].
    FrameSummary(FrameSummary),
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
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos.checked_add(N)?)?;
        self.pos += N;
        bytes.try_into().ok()
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

    fn read_option_u64(&mut self) -> Option<Option<u64>> {
        let present = self.read_u8()?;
        let val = self.read_u64()?;
        Some((present != 0).then_some(val))
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        match self.read_u8()? {
            0 => Some(PhaseKind::Animate),
            1 => Some(PhaseKind::Render),
            2 => Some(PhaseKind::Present),
            _ => None,
        }
    }

    fn decode_frame_tick(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameTick(FrameTickEvent {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            interval: self.read_option_u64()?.map(Duration),
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

    fn decode_scheduler_tick(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SchedulerTick(SchedulerTickEvent {
            frame_index: self.read_u64()?,
            ran: self.read_u32()?,
            finished: self.read_u32()?,
            cancelled: self.read_u32()?,
            live: self.read_u32()?,
        }))
    }

    fn decode_render_stats(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RenderStats(RenderStatsEvent {
            frame_index: self.read_u64()?,
            drawn: self.read_u32()?,
            culled: self.read_u32()?,
            halos: self.read_u32()?,
        }))
    }

    fn decode_frame_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameSummary(FrameSummary {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            interval: self.read_option_u64()?.map(Duration),
            animate: Duration(self.read_u64()?),
            render: Duration(self.read_u64()?),
            present: Duration(self.read_u64()?),
            live_tasks: self.read_u32()?,
            drawn: self.read_u32()?,
            culled: self.read_u32()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FRAME_TICK => self.decode_frame_tick(),
            TAG_PHASE_BEGIN => self.decode_phase_begin(),
            TAG_PHASE_END => self.decode_phase_end(),
            TAG_SCHEDULER_TICK => self.decode_scheduler_tick(),
            TAG_RENDER_STATS => self.decode_render_stats(),
            TAG_FRAME_SUMMARY => self.decode_frame_summary(),
            _ => None, // unknown tag → stop iteration
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
            frame_index: 7,
            now: HostTime(1_000_000),
            interval: Some(Duration(16_667)),
        }
    }

    fn sample_summary() -> FrameSummary {
        FrameSummary {
            frame_index: 7,
            now: HostTime(1_000_000),
            interval: None,
            animate: Duration(120),
            render: Duration(4_800),
            present: Duration(300),
            live_tasks: 2,
            drawn: 40,
            culled: 3,
        }
    }

    fn record(f: impl FnOnce(&mut RecorderSink)) -> Vec<RecordedEvent> {
        let mut rec = RecorderSink::new();
        f(&mut rec);
        decode(rec.as_bytes()).collect()
    }

    #[test]
    fn frame_tick_survives_recording() {
        let events = record(|r| r.on_frame_tick(&sample_tick()));
        assert_eq!(events, [RecordedEvent::FrameTick(sample_tick())]);
    }

    #[test]
    fn phase_pair_keeps_order_and_phase() {
        let begin = PhaseBeginEvent {
            frame_index: 5,
            phase: PhaseKind::Render,
            timestamp: HostTime(2000),
        };
        let end = PhaseEndEvent {
            frame_index: 5,
            phase: PhaseKind::Render,
            timestamp: HostTime(3000),
        };
        let events = record(|r| {
            r.on_phase_begin(&begin);
            r.on_phase_end(&end);
        });
        assert_eq!(
            events,
            [RecordedEvent::PhaseBegin(begin), RecordedEvent::PhaseEnd(end)]
        );
    }

    #[test]
    fn counters_and_summary() {
        let sched = SchedulerTickEvent {
            frame_index: 7,
            ran: 3,
            finished: 1,
            cancelled: 1,
            live: 1,
        };
        let stats = RenderStatsEvent {
            frame_index: 7,
            drawn: 40,
            culled: 3,
            halos: 0,
        };
        let events = record(|r| {
            r.on_frame_tick(&sample_tick());
            r.on_scheduler_tick(&sched);
            r.on_render_stats(&stats);
            r.on_frame_summary(&sample_summary());
        });
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], RecordedEvent::FrameTick(_)));
        assert_eq!(events[1], RecordedEvent::SchedulerTick(sched));
        assert_eq!(events[2], RecordedEvent::RenderStats(stats));
        assert_eq!(events[3], RecordedEvent::FrameSummary(sample_summary()));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        assert_eq!(decode(&[]).count(), 0);
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&sample_tick());
        rec.on_frame_summary(&sample_summary());
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 3];
        let events: Vec<_> = decode(cut).collect();
        assert_eq!(events, [RecordedEvent::FrameTick(sample_tick())]);
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&sample_tick());
        let mut bytes = rec.into_bytes();
        bytes.push(0xff);
        bytes.extend_from_slice(&[0; 16]);
        assert_eq!(decode(&bytes).count(), 1);
    }
}
