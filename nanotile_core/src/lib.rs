// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioned objects and intrusive object lists for tile-based displays.
//!
//! `nanotile_core` is the scene-graph layer of a small-display renderer that
//! redraws only dirty tiles. It is `no_std` compatible (with `alloc`) and
//! keeps objects in struct-of-arrays storage addressed by generational
//! handles.
//!
//! # Architecture
//!
//! Objects report stale areas to a tiler as they change; the tiler decides
//! which tiles to redraw:
//!
//! ```text
//!   move_to / resize / add / insert / remove
//!       │
//!       ▼
//!   ObjectStore ──► Tiler::refresh_world(rect) ──► dirty tiles
//!       │
//!       ▼
//!   run_frame: update ──► refresh ──► draw ──► TraceSink
//! ```
//!
//! **[`geometry`]**: Integer [`Point`](geometry::Point) and inclusive
//! [`Rect`](geometry::Rect).
//!
//! **[`tiler`]**: The [`Tiler`](tiler::Tiler) invalidation contract and the
//! recording [`DamageLog`](tiler::DamageLog).
//!
//! **[`object`]**: The [`ObjectStore`](object::ObjectStore): object
//! geometry, object lists, behaviours, and the frame driver. The module docs
//! list exactly which areas each mutation invalidates.
//!
//! **[`menu`]**: Vertical menus with wrap-around selection, built on object
//! lists.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Example
//!
//! ```
//! use nanotile_core::geometry::{Point, Rect};
//! use nanotile_core::object::ObjectStore;
//! use nanotile_core::tiler::DamageLog;
//!
//! let mut store = ObjectStore::new();
//! let tiler = store.attach_tiler(DamageLog::new());
//! let root = store.create_list(Point::ZERO, Point::new(128, 64));
//! store.set_tiler(root, Some(tiler));
//!
//! let sprite = store.create_object(Point::new(8, 8), Point::new(4, 4));
//! store.add(root, sprite).unwrap();
//! store.move_to(sprite, Point::new(16, 8));
//!
//! assert_eq!(
//!     store.tiler(tiler).rects(),
//!     &[
//!         Rect::new(Point::new(8, 8), Point::new(11, 11)),
//!         Rect::new(Point::new(8, 8), Point::new(11, 11)),
//!         Rect::new(Point::new(16, 8), Point::new(19, 11)),
//!     ]
//! );
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Buffers per-object
//!   membership and invalidation records and flushes them each frame.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod geometry;
pub mod menu;
pub mod object;
pub mod tiler;
pub mod trace;
