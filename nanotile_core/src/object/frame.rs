// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame driver.
//!
//! A frame runs three phases on a root object, in order:
//!
//! 1. **Update**: behaviour hooks advance state and may move objects, which
//!    invalidates areas immediately.
//! 2. **Refresh**: the root re-targets and invalidates its members.
//! 3. **Draw**: behaviour hooks paint into their tiler.
//!
//! Nothing in a frame blocks or suspends; the caller ticks it from its own
//! loop.

use core::mem;

use crate::tiler::Tiler;
use crate::trace::{FrameSummary, PhaseBeginEvent, PhaseEndEvent, PhaseKind, Tracer};

use super::id::ObjectId;
use super::store::ObjectStore;

impl<T: Tiler> ObjectStore<T> {
    /// Runs one frame on `root` and returns its work counters.
    ///
    /// The `invalidated` count includes refreshes caused by mutations made
    /// since the previous frame. With `trace-rich`, buffered membership
    /// changes and invalidated rects are flushed to `tracer` before the
    /// summary.
    pub fn run_frame(
        &mut self,
        root: ObjectId,
        frame_index: u64,
        tracer: &mut Tracer<'_>,
    ) -> FrameSummary {
        self.validate(root);

        for phase in [PhaseKind::Update, PhaseKind::Refresh, PhaseKind::Draw] {
            tracer.phase_begin(&PhaseBeginEvent { frame_index, phase });
            match phase {
                PhaseKind::Update => self.update(root),
                PhaseKind::Refresh => self.refresh(root),
                PhaseKind::Draw => self.draw(root),
            }
            tracer.phase_end(&PhaseEndEvent { frame_index, phase });
        }

        let summary = FrameSummary {
            frame_index,
            ..mem::take(&mut self.stats)
        };

        #[cfg(feature = "trace-rich")]
        {
            tracer.membership_changes(frame_index, &self.pending_membership);
            self.pending_membership.clear();
            tracer.invalidations(frame_index, &self.pending_invalidations);
            self.pending_invalidations.clear();
        }

        tracer.frame_summary(&summary);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};
    use crate::object::{Behavior, ObjectMut};
    use crate::tiler::DamageLog;

    struct Bouncer;

    impl Behavior<DamageLog> for Bouncer {
        fn update(&mut self, object: &mut ObjectMut<'_, DamageLog>) {
            object.move_by(Point::new(2, 0));
        }

        fn draw(&self, _rect: Rect, _tiler: &mut DamageLog) {}
    }

    #[test]
    fn frame_counts_work() {
        let mut store = ObjectStore::new();
        let tiler = store.attach_tiler(DamageLog::new());
        let root = store.create_list(Point::ZERO, Point::new(64, 32));
        store.set_tiler(root, Some(tiler));
        let sprite = store.create_object(Point::ZERO, Point::new(4, 4));
        let still = store.create_object(Point::new(10, 10), Point::new(4, 4));
        store.set_behavior(sprite, Bouncer);
        store.add(root, sprite).unwrap();
        store.add(root, still).unwrap();

        let mut tracer = Tracer::none();
        let summary = store.run_frame(root, 0, &mut tracer);

        assert_eq!(summary.frame_index, 0);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.drawn, 1);
        // Two adds, one move (two rects), one refresh of two members.
        assert_eq!(summary.invalidated, 6);
        assert_eq!(store.tiler(tiler).rects().len(), 6);

        let next = store.run_frame(root, 1, &mut tracer);
        assert_eq!(next.invalidated, 4, "counters reset between frames");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn phases_run_in_order() {
        use alloc::vec::Vec;

        use crate::trace::TraceSink;

        #[derive(Default)]
        struct PhaseSink {
            begins: Vec<PhaseKind>,
            summaries: Vec<u64>,
        }
        impl TraceSink for PhaseSink {
            fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
                self.begins.push(e.phase);
            }
            fn on_frame_summary(&mut self, s: &FrameSummary) {
                self.summaries.push(s.frame_index);
            }
        }

        let mut store = ObjectStore::<DamageLog>::new();
        let root = store.create_list(Point::ZERO, Point::ONE);
        let mut sink = PhaseSink::default();
        let mut tracer = Tracer::new(&mut sink);
        let _ = store.run_frame(root, 9, &mut tracer);
        drop(tracer);

        assert_eq!(
            sink.begins,
            &[PhaseKind::Update, PhaseKind::Refresh, PhaseKind::Draw]
        );
        assert_eq!(sink.summaries, &[9]);
    }

    #[cfg(feature = "trace-rich")]
    #[test]
    fn rich_records_are_flushed_per_frame() {
        use alloc::vec::Vec;

        use crate::trace::{InvalidationRect, MembershipChange, MembershipKind, TraceSink};

        #[derive(Default)]
        struct RichSink {
            changes: Vec<MembershipChange>,
            rects: Vec<InvalidationRect>,
        }
        impl TraceSink for RichSink {
            fn on_membership_changes(&mut self, _frame: u64, changes: &[MembershipChange]) {
                self.changes.extend_from_slice(changes);
            }
            fn on_invalidations(&mut self, _frame: u64, rects: &[InvalidationRect]) {
                self.rects.extend_from_slice(rects);
            }
        }

        let mut store = ObjectStore::new();
        let tiler = store.attach_tiler(DamageLog::new());
        let root = store.create_list(Point::ZERO, Point::ONE);
        store.set_tiler(root, Some(tiler));
        let a = store.create_object(Point::new(3, 3), Point::new(2, 2));
        store.add(root, a).unwrap();
        store.remove(root, a).unwrap();

        let mut sink = RichSink::default();
        let mut tracer = Tracer::new(&mut sink);
        let _ = store.run_frame(root, 0, &mut tracer);
        let _ = store.run_frame(root, 1, &mut tracer);
        drop(tracer);

        let kinds: Vec<_> = sink.changes.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, &[MembershipKind::Added, MembershipKind::Removed]);
        assert_eq!(sink.rects.len(), 2);
        assert!(sink.rects.iter().all(|r| r.object_index == a.index()));
    }
}
