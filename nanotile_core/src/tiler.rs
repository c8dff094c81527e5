// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The invalidation contract between objects and the tile renderer.
//!
//! A *tiler* owns the dirty-tile bookkeeping of a display. Objects never know
//! how tiles are laid out; they only report world-space areas that became
//! stale through [`Tiler::refresh_world`]. Whether the tiler keeps a bitmap,
//! a rect list, or redraws everything is its own business.

use alloc::vec::Vec;
use core::fmt;

use crate::geometry::{Point, Rect};

/// Receives stale-area notifications from objects.
pub trait Tiler {
    /// Declares that the pixels inside `rect` (world coordinates, inclusive
    /// bounds) must be redrawn before the next frame is presented.
    ///
    /// Calls are idempotent and may arrive in any order relative to drawing;
    /// the tiler only has to remember the area.
    fn refresh_world(&mut self, rect: Rect);
}

impl<T: Tiler + ?Sized> Tiler for &mut T {
    fn refresh_world(&mut self, rect: Rect) {
        (**self).refresh_world(rect);
    }
}

/// Identifies a tiler attached to an [`ObjectStore`](crate::object::ObjectStore).
///
/// Handed out by [`attach_tiler`](crate::object::ObjectStore::attach_tiler).
/// Objects hold a `TilerId` as a non-owning association; the store owns the
/// tiler itself.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TilerId(pub(crate) u32);

impl TilerId {
    /// Returns the raw index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TilerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TilerId({})", self.0)
    }
}

/// A [`Tiler`] that records every invalidated area in call order.
///
/// Rects may overlap and are not deduplicated. Useful as a test double and
/// as the input to a partial-redraw pass that works on rect lists instead of
/// a tile bitmap.
#[derive(Clone, Debug, Default)]
pub struct DamageLog {
    rects: Vec<Rect>,
}

impl DamageLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded rects, oldest first.
    #[must_use]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Returns `true` if nothing was invalidated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Removes and returns all recorded rects.
    pub fn take(&mut self) -> Vec<Rect> {
        core::mem::take(&mut self.rects)
    }

    /// Forgets all recorded rects.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Returns whether pixel `p` lies inside any recorded area.
    #[must_use]
    pub fn covers(&self, p: Point) -> bool {
        self.rects.iter().any(|r| r.contains(p))
    }

    /// Returns the union of all recorded areas, if any.
    #[must_use]
    pub fn bounds(&self) -> Option<kurbo::Rect> {
        let mut it = self.rects.iter().map(|r| r.to_kurbo());
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }
}

impl Tiler for DamageLog {
    fn refresh_world(&mut self, rect: Rect) {
        self.rects.push(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let mut log = DamageLog::new();
        let a = Rect::new(Point::new(0, 0), Point::new(1, 1));
        let b = Rect::new(Point::new(4, 4), Point::new(5, 5));
        log.refresh_world(a);
        log.refresh_world(b);
        log.refresh_world(a);
        assert_eq!(log.rects(), &[a, b, a]);
    }

    #[test]
    fn take_empties_the_log() {
        let mut log = DamageLog::new();
        log.refresh_world(Rect::default());
        assert_eq!(log.take().len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn bounds_is_union() {
        let mut log = DamageLog::new();
        assert!(log.bounds().is_none());
        log.refresh_world(Rect::new(Point::new(0, 0), Point::new(1, 1)));
        log.refresh_world(Rect::new(Point::new(8, 2), Point::new(9, 3)));
        assert_eq!(log.bounds(), Some(kurbo::Rect::new(0.0, 0.0, 10.0, 4.0)));
    }

    #[test]
    fn covers_checks_every_rect() {
        let mut log = DamageLog::new();
        log.refresh_world(Rect::new(Point::new(0, 0), Point::new(1, 1)));
        log.refresh_world(Rect::new(Point::new(8, 2), Point::new(9, 3)));
        assert!(log.covers(Point::new(1, 1)));
        assert!(log.covers(Point::new(9, 2)));
        assert!(!log.covers(Point::new(4, 1)));
    }

    #[test]
    fn mutable_reference_forwards() {
        fn touch<T: Tiler>(mut tiler: T) {
            tiler.refresh_world(Rect::default());
        }

        let mut log = DamageLog::new();
        touch(&mut log);
        assert_eq!(log.rects().len(), 1);
    }
}
