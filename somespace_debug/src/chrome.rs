// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Phases become duration slices, frame ticks and summaries become instant
//! events, and scheduler and render counters become counter tracks, so
//! animation task counts and culling can be read alongside frame timing.
//! Counter events carry no timestamp of their own; they are placed at the
//! time of the most recent frame tick.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Host times are already microseconds, which is the format's `ts` unit.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_tick_us = 0_u64;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::FrameTick(e) => {
                last_tick_us = e.now.micros();
                events.push(json!({
                    "ph": "i",
                    "name": "FrameTick",
                    "cat": "Frame",
                    "ts": e.now.micros(),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                        "interval_us": e.interval.map(|d| d.micros()),
                    }
                }));
            }
            RecordedEvent::PhaseBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": e.phase.name(),
                    "cat": "Frame",
                    "ts": e.timestamp.micros(),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": e.phase.name(),
                    "cat": "Frame",
                    "ts": e.timestamp.micros(),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::SchedulerTick(e) => {
                events.push(json!({
                    "ph": "C",
                    "name": "Animations",
                    "cat": "Scheduler",
                    "ts": last_tick_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "live": e.live,
                        "finished": e.finished,
                        "cancelled": e.cancelled,
                    }
                }));
            }
            RecordedEvent::RenderStats(e) => {
                events.push(json!({
                    "ph": "C",
                    "name": "Entities",
                    "cat": "Render",
                    "ts": last_tick_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "drawn": e.drawn,
                        "culled": e.culled,
                        "halos": e.halos,
                    }
                }));
            }
            RecordedEvent::FrameSummary(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameSummary",
                    "cat": "Summary",
                    "ts": s.now.micros(),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "animate_us": s.animate.micros(),
                        "render_us": s.render.micros(),
                        "present_us": s.present.micros(),
                        "live_tasks": s.live_tasks,
                        "drawn": s.drawn,
                        "culled": s.culled,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use somespace_core::time::{Duration, HostTime};
    use somespace_core::trace::{
        FrameTickEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind, RenderStatsEvent,
        SchedulerTickEvent, TraceSink,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&FrameTickEvent {
            frame_index: 0,
            now: HostTime(1_000_000),
            interval: Some(Duration(16_667)),
        });
        rec.on_phase_begin(&PhaseBeginEvent {
            frame_index: 0,
            phase: PhaseKind::Render,
            timestamp: HostTime(1_000_000),
        });
        rec.on_phase_end(&PhaseEndEvent {
            frame_index: 0,
            phase: PhaseKind::Render,
            timestamp: HostTime(1_000_100),
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "FrameTick");
        assert_eq!(parsed[0]["args"]["interval_us"], 16_667);

        assert_eq!(parsed[1]["ph"], "B");
        assert_eq!(parsed[1]["name"], "render");
        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["ts"], 1_000_100);
    }

    #[test]
    fn counters_take_the_tick_time() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&FrameTickEvent {
            frame_index: 4,
            now: HostTime(2_500),
            interval: None,
        });
        rec.on_scheduler_tick(&SchedulerTickEvent {
            frame_index: 4,
            ran: 2,
            finished: 1,
            cancelled: 0,
            live: 1,
        });
        rec.on_render_stats(&RenderStatsEvent {
            frame_index: 4,
            drawn: 12,
            culled: 5,
            halos: 0,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 3);
        assert!(parsed[0]["args"]["interval_us"].is_null());
        assert_eq!(parsed[1]["ph"], "C");
        assert_eq!(parsed[1]["ts"], 2_500);
        assert_eq!(parsed[1]["args"]["live"], 1);
        assert_eq!(parsed[2]["name"], "Entities");
        assert_eq!(parsed[2]["args"]["culled"], 5);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
