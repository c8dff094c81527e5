// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Frames carry no wall-clock time, so timestamps are synthetic: each frame
//! occupies [`FRAME_SPAN_US`] microseconds and each phase a fixed slot within
//! it.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use nanotile_core::trace::PhaseKind;
use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Synthetic duration of one frame on the exported timeline.
pub const FRAME_SPAN_US: u64 = 1000;

const PHASE_SPAN_US: u64 = FRAME_SPAN_US / 4;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Membership changes and invalidated rects become instant events on a
/// second track.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::PhaseBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": phase_start(e.frame_index, e.phase),
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
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": phase_start(e.frame_index, e.phase) + PHASE_SPAN_US,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::FrameSummary(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameSummary",
                    "cat": "Summary",
                    "ts": frame_end(s.frame_index),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "updated": s.updated,
                        "invalidated": s.invalidated,
                        "drawn": s.drawn,
                    }
                }));
            }
            RecordedEvent::Membership {
                frame_index,
                list_index,
                object_index,
                kind,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{kind:?}"),
                    "cat": "Membership",
                    "ts": frame_end(frame_index),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "frame_index": frame_index,
                        "list": list_index,
                        "object": object_index,
                    }
                }));
            }
            RecordedEvent::Invalidation {
                frame_index,
                object_index,
                tiler_index,
                rect,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Invalidate",
                    "cat": "Damage",
                    "ts": frame_end(frame_index),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "frame_index": frame_index,
                        "object": object_index,
                        "tiler": tiler_index,
                        "rect": [rect.p1.x, rect.p1.y, rect.p2.x, rect.p2.y],
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn phase_start(frame_index: u64, phase: PhaseKind) -> u64 {
    let slot = match phase {
        PhaseKind::Update => 0,
        PhaseKind::Refresh => 1,
        PhaseKind::Draw => 2,
    };
    frame_index * FRAME_SPAN_US + slot * PHASE_SPAN_US
}

fn frame_end(frame_index: u64) -> u64 {
    frame_index * FRAME_SPAN_US + 3 * PHASE_SPAN_US
}

#[cfg(test)]
mod tests {
    use nanotile_core::trace::{FrameSummary, PhaseBeginEvent, PhaseEndEvent, TraceSink};

    use super::*;
    use crate::recorder::RecorderSink;

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_phase_begin(&PhaseBeginEvent {
            frame_index: 2,
            phase: PhaseKind::Refresh,
        });
        rec.on_phase_end(&PhaseEndEvent {
            frame_index: 2,
            phase: PhaseKind::Refresh,
        });
        rec.on_frame_summary(&FrameSummary {
            frame_index: 2,
            updated: 0,
            invalidated: 7,
            drawn: 1,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["name"], "Refresh");
        assert_eq!(parsed[0]["ts"], 2250);

        assert_eq!(parsed[1]["ph"], "E");
        assert_eq!(parsed[1]["ts"], 2500);

        assert_eq!(parsed[2]["name"], "FrameSummary");
        assert_eq!(parsed[2]["args"]["invalidated"], 7);
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
