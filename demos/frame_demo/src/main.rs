// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated frame loop that exercises objects, menus, and the tracing
//! pipeline.
//!
//! Runs 60 frames of a 128x64 display with one bouncing sprite and a
//! three-item menu whose selection moves every ten frames. Events go to both
//! a [`PrettyPrintSink`](nanotile_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](nanotile_debug::recorder::RecorderSink); the recording is
//! exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use nanotile_core::geometry::Point;
use nanotile_core::menu::{Menu, MenuLayout};
use nanotile_core::object::{Behavior, ObjectMut, ObjectStore};
use nanotile_core::tiler::DamageLog;
use nanotile_core::trace::{
    FrameSummary, InvalidationRect, MembershipChange, PhaseBeginEvent, PhaseEndEvent, TraceSink,
    Tracer,
};

use nanotile_debug::pretty::PrettyPrintSink;
use nanotile_debug::recorder::RecorderSink;

const FRAME_COUNT: u64 = 60;
const DISPLAY: Point = Point::new(128, 64);

/// Moves by `velocity` each frame and bounces off the display edges.
struct Bouncer {
    velocity: Point,
}

impl Behavior<DamageLog> for Bouncer {
    fn update(&mut self, object: &mut ObjectMut<'_, DamageLog>) {
        let r = object.rect().translate(self.velocity);
        if r.p1.x < 0 || r.p2.x >= DISPLAY.x {
            self.velocity.x = -self.velocity.x;
        }
        if r.p1.y < 0 || r.p2.y >= DISPLAY.y {
            self.velocity.y = -self.velocity.y;
        }
        object.move_by(self.velocity);
    }
}

/// A menu entry that grows by one pixel while it is selected.
#[derive(Default)]
struct Item {
    focused: bool,
    grown: bool,
}

impl Behavior<DamageLog> for Item {
    fn update(&mut self, object: &mut ObjectMut<'_, DamageLog>) {
        if self.focused != self.grown {
            let delta = if self.focused { 1 } else { -1 };
            let size = object.rect().size() + Point::new(0, delta);
            object.resize(size);
            self.grown = self.focused;
        }
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn defocus(&mut self) {
        self.focused = false;
    }
}

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.a.on_phase_begin(e);
        self.b.on_phase_begin(e);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.a.on_phase_end(e);
        self.b.on_phase_end(e);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.a.on_frame_summary(s);
        self.b.on_frame_summary(s);
    }

    fn on_membership_changes(&mut self, frame_index: u64, changes: &[MembershipChange]) {
        self.a.on_membership_changes(frame_index, changes);
        self.b.on_membership_changes(frame_index, changes);
    }

    fn on_invalidations(&mut self, frame_index: u64, rects: &[InvalidationRect]) {
        self.a.on_invalidations(frame_index, rects);
        self.b.on_invalidations(frame_index, rects);
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- scene -------------------------------------------------------------
    let mut store = ObjectStore::new();
    let tiler = store.attach_tiler(DamageLog::new());
    let root = store.create_list(Point::ZERO, DISPLAY);
    store.set_tiler(root, Some(tiler));

    let sprite = store.create_object(Point::new(10, 40), Point::new(6, 6));
    store.set_behavior(sprite, Bouncer {
        velocity: Point::new(3, -2),
    });
    store.add(root, sprite).expect("sprite joins the root list");

    let mut menu = Menu::new(&mut store, Point::new(64, 0), MenuLayout::FixedWidth {
        size: Point::new(60, 40),
    });
    store.add(root, menu.id()).expect("menu joins the root list");
    for _ in 0..3 {
        let item = store.create_object(Point::ZERO, Point::new(1, 8));
        store.set_behavior(item, Item::default());
        menu.add(&mut store, item).expect("fresh item joins the menu");
    }

    // -- frame loop --------------------------------------------------------
    let mut total = FrameSummary::default();
    for frame_index in 0..FRAME_COUNT {
        if frame_index > 0 && frame_index.is_multiple_of(10) {
            menu.down(&mut store);
        }

        let mut tee = Tee {
            a: &mut pretty,
            b: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);
        let summary = store.run_frame(root, frame_index, &mut tracer);

        total.updated += summary.updated;
        total.invalidated += summary.invalidated;
        total.drawn += summary.drawn;
    }

    let damage = store.tiler_mut(tiler);
    let bounds = damage.bounds();
    let rects = damage.take();

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    nanotile_debug::json::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!(
        "Wrote {path} ({FRAME_COUNT} frames, {} updates, {} draws, {} invalidations, {} rects, damage bounds {bounds:?})",
        total.updated,
        total.drawn,
        total.invalidated,
        rects.len(),
    );
}
