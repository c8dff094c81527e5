// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Rich events are stored one record per entry, so a recording keeps every
//! invalidated rect and not just the per-frame count.

use nanotile_core::geometry::{Point, Rect};
use nanotile_core::trace::{
    FrameSummary, InvalidationRect, MembershipChange, MembershipKind, PhaseBeginEvent,
    PhaseEndEvent, PhaseKind, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PHASE_BEGIN: u8 = 1;
const TAG_PHASE_END: u8 = 2;
const TAG_FRAME_SUMMARY: u8 = 3;
const TAG_MEMBERSHIP: u8 = 4;
const TAG_INVALIDATION: u8 = 5;

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

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_rect(&mut self, r: Rect) {
        self.write_i32(r.p1.x);
        self.write_i32(r.p1.y);
        self.write_i32(r.p2.x);
        self.write_i32(r.p2.y);
    }

    fn write_phase(&mut self, p: PhaseKind) {
        self.write_u8(match p {
            PhaseKind::Update => 0,
            PhaseKind::Refresh => 1,
            PhaseKind::Draw => 2,
        });
    }

    fn write_membership(&mut self, k: MembershipKind) {
        self.write_u8(match k {
            MembershipKind::Added => 0,
            MembershipKind::Inserted => 1,
            MembershipKind::Removed => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.write_u8(TAG_PHASE_BEGIN);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.write_u8(TAG_PHASE_END);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.write_u8(TAG_FRAME_SUMMARY);
        self.write_u64(s.frame_index);
        self.write_u32(s.updated);
        self.write_u32(s.invalidated);
        self.write_u32(s.drawn);
    }

    fn on_membership_changes(&mut self, frame_index: u64, changes: &[MembershipChange]) {
        for c in changes {
            self.write_u8(TAG_MEMBERSHIP);
            self.write_u64(frame_index);
            self.write_u32(c.list_index);
            self.write_u32(c.object_index);
            self.write_membership(c.kind);
        }
    }

    fn on_invalidations(&mut self, frame_index: u64, rects: &[InvalidationRect]) {
        for r in rects {
            self.write_u8(TAG_INVALIDATION);
            self.write_u64(frame_index);
            self.write_u32(r.object_index);
            self.write_u32(r.tiler.index());
            self.write_rect(r.rect);
        }
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`PhaseBeginEvent`].
    PhaseBegin(PhaseBeginEvent),
    /// A [`PhaseEndEvent`].
    PhaseEnd(PhaseEndEvent),
    /// A [`FrameSummary`].
    FrameSummary(FrameSummary),
    /// One membership change.
    Membership {
        /// Frame the change was flushed in.
        frame_index: u64,
        /// Slot index of the list.
        list_index: u32,
        /// Slot index of the object.
        object_index: u32,
        /// What happened.
        kind: MembershipKind,
    },
    /// One invalidated rect.
    Invalidation {
        /// Frame the rect was flushed in.
        frame_index: u64,
        /// Slot index of the object that reported the rect.
        object_index: u32,
        /// Index of the tiler that received it.
        tiler_index: u32,
        /// The invalidated area, inclusive.
        rect: Rect,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Decoding stops at the first unknown tag, unknown enum byte, or truncated
/// record.
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

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_rect(&mut self) -> Option<Rect> {
        let p1 = Point::new(self.read_i32()?, self.read_i32()?);
        let p2 = Point::new(self.read_i32()?, self.read_i32()?);
        Some(Rect::new(p1, p2))
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        Some(match self.read_u8()? {
            0 => PhaseKind::Update,
            1 => PhaseKind::Refresh,
            2 => PhaseKind::Draw,
            _ => return None,
        })
    }

    fn read_membership(&mut self) -> Option<MembershipKind> {
        Some(match self.read_u8()? {
            0 => MembershipKind::Added,
            1 => MembershipKind::Inserted,
            2 => MembershipKind::Removed,
            _ => return None,
        })
    }

    fn decode_phase_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseBegin(PhaseBeginEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
        }))
    }

    fn decode_phase_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseEnd(PhaseEndEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
        }))
    }

    fn decode_frame_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameSummary(FrameSummary {
            frame_index: self.read_u64()?,
            updated: self.read_u32()?,
            invalidated: self.read_u32()?,
            drawn: self.read_u32()?,
        }))
    }

    fn decode_membership(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Membership {
            frame_index: self.read_u64()?,
            list_index: self.read_u32()?,
            object_index: self.read_u32()?,
            kind: self.read_membership()?,
        })
    }

    fn decode_invalidation(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Invalidation {
            frame_index: self.read_u64()?,
            object_index: self.read_u32()?,
            tiler_index: self.read_u32()?,
            rect: self.read_rect()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_PHASE_BEGIN => self.decode_phase_begin(),
            TAG_PHASE_END => self.decode_phase_end(),
            TAG_FRAME_SUMMARY => self.decode_frame_summary(),
            TAG_MEMBERSHIP => self.decode_membership(),
            TAG_INVALIDATION => self.decode_invalidation(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use nanotile_core::object::ObjectStore;
    use nanotile_core::tiler::DamageLog;
    use nanotile_core::trace::Tracer;

    use super::*;

    #[test]
    fn summary_decodes() {
        let mut rec = RecorderSink::new();
        let summary = FrameSummary {
            frame_index: 42,
            updated: 1,
            invalidated: 5,
            drawn: 2,
        };
        rec.on_frame_summary(&summary);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events, vec![RecordedEvent::FrameSummary(summary)]);
    }

    #[test]
    fn recorded_frame_keeps_every_rect() {
        let mut store = ObjectStore::new();
        let tiler = store.attach_tiler(DamageLog::new());
        let root = store.create_list(Point::ZERO, Point::new(32, 32));
        store.set_tiler(root, Some(tiler));
        let a = store.create_object(Point::new(1, 1), Point::new(2, 2));
        store.add(root, a).unwrap();
        store.move_to(a, Point::new(5, 1));

        let mut rec = RecorderSink::new();
        let mut tracer = Tracer::new(&mut rec);
        let _ = store.run_frame(root, 3, &mut tracer);
        drop(tracer);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        let rects: Vec<Rect> = events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Invalidation { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        // add, move (old + new), frame refresh
        assert_eq!(rects, store.tiler(tiler).rects());
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[1], Rect::new(Point::new(1, 1), Point::new(2, 2)));
        assert_eq!(rects[2], Rect::new(Point::new(5, 1), Point::new(6, 2)));

        assert!(matches!(
            events.last(),
            Some(RecordedEvent::FrameSummary(FrameSummary {
                frame_index: 3,
                invalidated: 4,
                ..
            }))
        ));
    }

    #[test]
    fn truncated_record_stops_decoding() {
        let mut rec = RecorderSink::new();
        rec.on_phase_begin(&PhaseBeginEvent {
            frame_index: 0,
            phase: PhaseKind::Update,
        });
        rec.on_phase_end(&PhaseEndEvent {
            frame_index: 0,
            phase: PhaseKind::Update,
        });
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 1];
        assert_eq!(decode(cut).count(), 1);
    }

    #[test]
    fn unknown_phase_byte_stops_decoding() {
        let mut rec = RecorderSink::new();
        for phase in [PhaseKind::Update, PhaseKind::Draw] {
            rec.on_phase_begin(&PhaseBeginEvent {
                frame_index: 0,
                phase,
            });
        }
        let mut bytes = rec.into_bytes();
        // tag (1) + frame index (8), then the phase byte of the second record
        let record_len = 1 + 8 + 1;
        bytes[record_len + 9] = 7;

        let events: Vec<_> = decode(&bytes).collect();
        assert_eq!(
            events,
            vec![RecordedEvent::PhaseBegin(PhaseBeginEvent {
                frame_index: 0,
                phase: PhaseKind::Update,
            })]
        );
    }

    #[test]
    fn unknown_membership_byte_stops_decoding() {
        let mut rec = RecorderSink::new();
        rec.on_membership_changes(
            1,
            &[MembershipChange {
                list_index: 0,
                object_index: 1,
                kind: MembershipKind::Removed,
            }],
        );
        let mut bytes = rec.into_bytes();
        let last = bytes.len() - 1;
        assert_eq!(bytes[last], 2);
        assert_eq!(decode(&bytes).count(), 1);

        bytes[last] = 3;
        assert_eq!(decode(&bytes).count(), 0);
    }
}
