// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Write errors
//! are ignored; tracing never interrupts a frame.

use std::io::Write;

use nanotile_core::geometry::Rect;
use nanotile_core::trace::{
    FrameSummary, InvalidationRect, MembershipChange, MembershipKind, PhaseBeginEvent,
    PhaseEndEvent, PhaseKind, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    verbose: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            verbose: false,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }

    /// Also prints every membership change and invalidated rect, not just
    /// their per-frame counts.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::Update => "update",
        PhaseKind::Refresh => "refresh",
        PhaseKind::Draw => "draw",
    }
}

fn membership_name(kind: MembershipKind) -> &'static str {
    match kind {
        MembershipKind::Added => "add",
        MembershipKind::Inserted => "insert",
        MembershipKind::Removed => "remove",
    }
}

fn fmt_rect(r: Rect) -> String {
    format!("({},{})-({},{})", r.p1.x, r.p1.y, r.p2.x, r.p2.y)
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:begin] frame={} {}",
            e.frame_index,
            phase_name(e.phase),
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:end] frame={} {}",
            e.frame_index,
            phase_name(e.phase),
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] frame={} updated={} invalidated={} drawn={}",
            s.frame_index, s.updated, s.invalidated, s.drawn,
        );
    }

    fn on_membership_changes(&mut self, frame_index: u64, changes: &[MembershipChange]) {
        let _ = writeln!(
            self.writer,
            "[members] frame={frame_index} changes={}",
            changes.len(),
        );
        if self.verbose {
            for c in changes {
                let _ = writeln!(
                    self.writer,
                    "  {} object={} list={}",
                    membership_name(c.kind),
                    c.object_index,
                    c.list_index,
                );
            }
        }
    }

    fn on_invalidations(&mut self, frame_index: u64, rects: &[InvalidationRect]) {
        let _ = writeln!(
            self.writer,
            "[invalidate] frame={frame_index} rects={}",
            rects.len(),
        );
        if self.verbose {
            for r in rects {
                let _ = writeln!(
                    self.writer,
                    "  object={} tiler={} rect={}",
                    r.object_index,
                    r.tiler.index(),
                    fmt_rect(r.rect),
                );
            }
        }
    }
}
