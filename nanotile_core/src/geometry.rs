// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer screen-space geometry.
//!
//! [`Rect`] stores two *inclusive* corners, matching how display controllers
//! address pixel windows: a rect from `(0, 0)` to `(7, 7)` covers 8×8 pixels.
//! Use [`Rect::to_kurbo`] when handing areas to kurbo-based code, which uses
//! exclusive far edges.

use core::ops::{Add, AddAssign, Sub, SubAssign};

/// A point (or a size, when used as an extent) in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);

    /// A 1×1 extent.
    pub const ONE: Self = Self::new(1, 1);

    /// Creates a point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// An axis-aligned rectangle with inclusive corners.
///
/// `p1` is the top-left and `p2` the bottom-right pixel. A well-formed rect
/// has `p1 <= p2` componentwise, so the smallest rect is 1×1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top-left corner (inclusive).
    pub p1: Point,
    /// Bottom-right corner (inclusive).
    pub p2: Point,
}

impl Rect {
    /// Creates a rect from its two inclusive corners.
    #[inline]
    #[must_use]
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Creates a rect from a top-left corner and a size.
    #[inline]
    #[must_use]
    pub const fn from_origin_size(origin: Point, size: Point) -> Self {
        Self {
            p1: origin,
            p2: Point::new(origin.x + size.x - 1, origin.y + size.y - 1),
        }
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.p2.x - self.p1.x + 1
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.p2.y - self.p1.y + 1
    }

    /// Size as a `(width, height)` point.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Point {
        Point::new(self.width(), self.height())
    }

    /// Returns the same-sized rect with its top-left corner at `origin`.
    #[inline]
    #[must_use]
    pub fn with_origin(self, origin: Point) -> Self {
        Self::new(origin, origin + (self.p2 - self.p1))
    }

    /// Returns the rect translated by `delta`.
    #[inline]
    #[must_use]
    pub fn translate(self, delta: Point) -> Self {
        Self::new(self.p1 + delta, self.p2 + delta)
    }

    /// Returns the rect shrunk by `inset` pixels on every side.
    #[inline]
    #[must_use]
    pub fn inset(self, inset: i32) -> Self {
        let d = Point::new(inset, inset);
        Self::new(self.p1 + d, self.p2 - d)
    }

    /// Returns whether the pixel `p` lies inside the rect.
    #[inline]
    #[must_use]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.p1.x && p.x <= self.p2.x && p.y >= self.p1.y && p.y <= self.p2.y
    }

    /// Converts to a kurbo rect covering the same pixels.
    ///
    /// The far edge becomes exclusive, so a 1×1 rect at the origin maps to
    /// `(0, 0, 1, 1)`.
    #[must_use]
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.p1.x),
            f64::from(self.p1.y),
            f64::from(self.p2.x) + 1.0,
            f64::from(self.p2.y) + 1.0,
        )
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(rect: Rect) -> Self {
        rect.to_kurbo()
    }
}
