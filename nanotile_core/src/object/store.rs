// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays object storage with allocation, geometry, and dispatch.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::geometry::{Point, Rect};
use crate::tiler::{Tiler, TilerId};
use crate::trace::FrameSummary;
#[cfg(feature = "trace-rich")]
use crate::trace::{InvalidationRect, MembershipChange};

use super::behavior::{Behavior, ObjectMut};
use super::id::{INVALID, ObjectId};

/// Struct-of-arrays storage for all objects, plus the tilers they report to.
///
/// Objects are addressed by [`ObjectId`] handles. Internally, each object
/// occupies a slot in parallel arrays. Destroyed objects are recycled via a
/// free list, and generation counters prevent stale handle access.
///
/// The store owns object storage; object lists only link and unlink members
/// (see the list operations such as [`add`](Self::add)).
pub struct ObjectStore<T> {
    // -- Geometry --
    pub(crate) rect: Vec<Rect>,

    // -- Invalidation target association --
    pub(crate) tiler: Vec<Option<TilerId>>,

    // -- Intrusive list links --
    pub(crate) next: Vec<u32>,
    pub(crate) owner: Vec<u32>,
    pub(crate) first: Vec<u32>,
    pub(crate) is_list: Vec<bool>,

    // -- Behaviour --
    pub(crate) behavior: Vec<Option<Box<dyn Behavior<T>>>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Tilers (owned) --
    pub(crate) tilers: Vec<T>,

    // -- Frame accounting --
    pub(crate) stats: FrameSummary,
    #[cfg(feature = "trace-rich")]
    pub(crate) pending_membership: Vec<MembershipChange>,
    #[cfg(feature = "trace-rich")]
    pub(crate) pending_invalidations: Vec<InvalidationRect>,
}

impl<T> core::fmt::Debug for ObjectStore<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectStore")
            .field("len", &self.len)
            .field("free", &self.free_list.len())
            .field("tilers", &self.tilers.len())
            .finish_non_exhaustive()
    }
}

impl<T> Default for ObjectStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObjectStore<T> {
    /// Upper bound on buffered membership changes, and separately on
    /// buffered invalidated rects, between two flushes.
    ///
    /// Records past the bound are dropped until
    /// [`run_frame`](Self::run_frame) or
    /// [`clear_trace_records`](Self::clear_trace_records) empties the buffers.
    #[cfg(feature = "trace-rich")]
    pub const MAX_PENDING_RECORDS: usize = 4096;

    /// Creates an empty store with no tilers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rect: Vec::new(),
            tiler: Vec::new(),
            next: Vec::new(),
            owner: Vec::new(),
            first: Vec::new(),
            is_list: Vec::new(),
            behavior: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            tilers: Vec::new(),
            stats: FrameSummary::default(),
            #[cfg(feature = "trace-rich")]
            pending_membership: Vec::new(),
            #[cfg(feature = "trace-rich")]
            pending_invalidations: Vec::new(),
        }
    }

    // -- Tiler API --

    /// Takes ownership of a tiler and returns its handle.
    ///
    /// Nothing reports to it until an object (usually a root list) is bound
    /// with [`set_tiler`](Self::set_tiler).
    pub fn attach_tiler(&mut self, tiler: T) -> TilerId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a display has a handful of tilers, never u32::MAX"
        )]
        let id = TilerId(self.tilers.len() as u32);
        self.tilers.push(tiler);
        id
    }

    /// Returns a tiler by handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not issued by this store.
    #[must_use]
    pub fn tiler(&self, id: TilerId) -> &T {
        self.validate_tiler(id);
        &self.tilers[id.0 as usize]
    }

    /// Returns a tiler by handle, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not issued by this store.
    pub fn tiler_mut(&mut self, id: TilerId) -> &mut T {
        self.validate_tiler(id);
        &mut self.tilers[id.0 as usize]
    }

    /// Associates an object with a tiler, or detaches it with `None`.
    ///
    /// Pure association: nothing is invalidated. Members of a list pick up
    /// the list's tiler on the next [`refresh`](Self::refresh) of the list.
    pub fn set_tiler(&mut self, id: ObjectId, tiler: Option<TilerId>) {
        self.validate(id);
        if let Some(t) = tiler {
            self.validate_tiler(t);
        }
        self.tiler[id.idx as usize] = tiler;
    }

    /// Returns whether the object currently reports to a tiler.
    #[must_use]
    pub fn has_tiler(&self, id: ObjectId) -> bool {
        self.tiler_of(id).is_some()
    }

    /// Returns the tiler the object currently reports to.
    #[must_use]
    pub fn tiler_of(&self, id: ObjectId) -> Option<TilerId> {
        self.validate(id);
        self.tiler[id.idx as usize]
    }

    // -- Allocation API --

    /// Creates a plain object with footprint `size` at `pos`.
    ///
    /// `size` must be at least 1×1.
    pub fn create_object(&mut self, pos: Point, size: Point) -> ObjectId {
        self.alloc(Rect::from_origin_size(pos, size), false)
    }

    /// Creates a 1×1 object at `pos`.
    pub fn create_object_at(&mut self, pos: Point) -> ObjectId {
        self.create_object(pos, Point::ONE)
    }

    /// Creates an empty object list with footprint `size` at `pos`.
    ///
    /// A list is itself an object: it can be positioned, given a behaviour,
    /// and nested into other lists.
    pub fn create_list(&mut self, pos: Point, size: Point) -> ObjectId {
        self.alloc(Rect::from_origin_size(pos, size), true)
    }

    /// Destroys an object, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the object is still a list member or is a list that still
    /// has members (unlink them first), or if the handle is stale.
    pub fn destroy_object(&mut self, id: ObjectId) {
        self.validate(id);
        let idx = id.idx as usize;
        assert!(
            self.owner[idx] == INVALID,
            "cannot destroy object that is still a list member"
        );
        assert!(
            self.first[idx] == INVALID,
            "cannot destroy list that still has members"
        );

        self.behavior[idx] = None;
        self.tiler[idx] = None;

        // Bump generation so old handles immediately fail validation.
        self.generation[idx] += 1;
        self.free_list.push(id.idx);
    }

    /// Returns whether the given handle refers to a live object.
    #[must_use]
    pub fn is_alive(&self, id: ObjectId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns whether the object was created as a list.
    #[must_use]
    pub fn is_list(&self, id: ObjectId) -> bool {
        self.validate(id);
        self.is_list[id.idx as usize]
    }

    /// Returns the list currently hosting the object, if any.
    #[must_use]
    pub fn owner(&self, id: ObjectId) -> Option<ObjectId> {
        self.validate(id);
        let o = self.owner[id.idx as usize];
        (o != INVALID).then(|| self.id_at(o))
    }

    /// Installs the object's behaviour, replacing any previous one.
    pub fn set_behavior(&mut self, id: ObjectId, behavior: impl Behavior<T> + 'static) {
        self.validate(id);
        self.behavior[id.idx as usize] = Some(Box::new(behavior));
    }

    /// Removes and returns the object's behaviour.
    pub fn take_behavior(&mut self, id: ObjectId) -> Option<Box<dyn Behavior<T>>> {
        self.validate(id);
        self.behavior[id.idx as usize].take()
    }

    // -- Geometry getters (pure reads) --

    /// Returns the area occupied by the object.
    #[must_use]
    pub fn rect(&self, id: ObjectId) -> Rect {
        self.validate(id);
        self.rect[id.idx as usize]
    }

    /// Returns the top-left corner.
    #[must_use]
    pub fn position(&self, id: ObjectId) -> Point {
        self.rect(id).p1
    }

    /// Returns the left edge.
    #[must_use]
    pub fn x(&self, id: ObjectId) -> i32 {
        self.rect(id).p1.x
    }

    /// Returns the top edge.
    #[must_use]
    pub fn y(&self, id: ObjectId) -> i32 {
        self.rect(id).p1.y
    }

    /// Returns the width in pixels.
    #[must_use]
    pub fn width(&self, id: ObjectId) -> i32 {
        self.rect(id).width()
    }

    /// Returns the height in pixels.
    #[must_use]
    pub fn height(&self, id: ObjectId) -> i32 {
        self.rect(id).height()
    }

    /// Returns the center point. Odd spans round toward `p1`.
    #[must_use]
    pub fn center(&self, id: ObjectId) -> Point {
        let r = self.rect(id);
        Point::new(mid(r.p1.x, r.p2.x), mid(r.p1.y, r.p2.y))
    }

    /// Returns the top-center point.
    #[must_use]
    pub fn top(&self, id: ObjectId) -> Point {
        let r = self.rect(id);
        Point::new(mid(r.p1.x, r.p2.x), r.p1.y)
    }

    /// Returns the bottom-center point.
    #[must_use]
    pub fn bottom(&self, id: ObjectId) -> Point {
        let r = self.rect(id);
        Point::new(mid(r.p1.x, r.p2.x), r.p2.y)
    }

    /// Returns the left-center point.
    #[must_use]
    pub fn left(&self, id: ObjectId) -> Point {
        let r = self.rect(id);
        Point::new(r.p1.x, mid(r.p1.y, r.p2.y))
    }

    /// Returns the right-center point.
    #[must_use]
    pub fn right(&self, id: ObjectId) -> Point {
        let r = self.rect(id);
        Point::new(r.p2.x, mid(r.p1.y, r.p2.y))
    }

    // -- Silent geometry mutation --

    /// Moves the object so its top-left corner is `p`. Does not invalidate
    /// anything; callers that need a redraw refresh on their own.
    pub fn set_pos(&mut self, id: ObjectId, p: Point) {
        self.validate(id);
        let r = &mut self.rect[id.idx as usize];
        *r = r.with_origin(p);
    }

    /// Sets the size, keeping the top-left corner. Does not invalidate
    /// anything.
    pub fn set_size(&mut self, id: ObjectId, size: Point) {
        self.validate(id);
        let r = &mut self.rect[id.idx as usize];
        *r = Rect::from_origin_size(r.p1, size);
    }

    /// Discards buffered rich trace records and resets the frame counters.
    ///
    /// For callers that drive `update`/`refresh`/`draw` themselves instead of
    /// calling [`run_frame`](Self::run_frame).
    pub fn clear_trace_records(&mut self) {
        self.stats = FrameSummary::default();
        #[cfg(feature = "trace-rich")]
        {
            self.pending_membership.clear();
            self.pending_invalidations.clear();
        }
    }

    // -- Internal helpers --

    /// Returns the live handle for slot `idx`.
    pub(crate) fn id_at(&self, idx: u32) -> ObjectId {
        ObjectId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ObjectId) {
        assert!(
            self.is_alive(id),
            "stale ObjectId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Panics if the handle is stale or does not refer to a list.
    pub(crate) fn validate_list(&self, id: ObjectId) {
        self.validate(id);
        assert!(self.is_list[id.idx as usize], "{id:?} is not an object list");
    }

    fn validate_tiler(&self, id: TilerId) {
        assert!(
            (id.0 as usize) < self.tilers.len(),
            "unknown TilerId: {id:?}"
        );
    }

    fn alloc(&mut self, rect: Rect, is_list: bool) -> ObjectId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot; the generation was bumped on destroy.
            let i = idx as usize;
            self.rect[i] = rect;
            self.tiler[i] = None;
            self.next[i] = INVALID;
            self.owner[i] = INVALID;
            self.first[i] = INVALID;
            self.is_list[i] = is_list;
            self.behavior[i] = None;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.rect.push(rect);
            self.tiler.push(None);
            self.next.push(INVALID);
            self.owner.push(INVALID);
            self.first.push(INVALID);
            self.is_list.push(is_list);
            self.behavior.push(None);
            self.generation.push(0);
            idx
        };
        self.id_at(idx)
    }
}

impl<T: Tiler> ObjectStore<T> {
    // -- Invalidating geometry mutation --

    /// Moves the object so its top-left corner is `p`.
    ///
    /// Refreshes the old footprint, moves, then refreshes the new one. The
    /// two areas are reported separately rather than as one bounding rect.
    pub fn move_to(&mut self, id: ObjectId, p: Point) {
        self.validate(id);
        self.refresh_at(id.idx);
        self.set_pos(id, p);
        self.refresh_at(id.idx);
    }

    /// Moves the object by `delta`, refreshing old and new footprints.
    pub fn move_by(&mut self, id: ObjectId, delta: Point) {
        self.validate(id);
        let p = self.rect[id.idx as usize].p1 + delta;
        self.move_to(id, p);
    }

    /// Resizes the object, refreshing old and new footprints.
    pub fn resize(&mut self, id: ObjectId, size: Point) {
        self.validate(id);
        self.refresh_at(id.idx);
        self.set_size(id, size);
        self.refresh_at(id.idx);
    }

    // -- Dispatch --

    /// Marks the object's area for redraw.
    ///
    /// A plain object reports its footprint to its tiler, or does nothing if
    /// it has none. A list instead hands its own tiler to every member and
    /// refreshes each of them, so re-attaching a whole sub-tree takes a
    /// single call on its root.
    pub fn refresh(&mut self, id: ObjectId) {
        self.validate(id);
        self.refresh_at(id.idx);
    }

    /// Runs the object's update hook, then (for lists) updates every member
    /// head to tail.
    pub fn update(&mut self, id: ObjectId) {
        self.validate(id);
        self.update_at(id.idx);
    }

    /// Runs the object's draw hook, then (for lists) draws every member head
    /// to tail. Objects without a tiler have nothing to draw into and skip
    /// their own hook.
    pub fn draw(&mut self, id: ObjectId) {
        self.validate(id);
        self.draw_at(id.idx);
    }

    /// Calls the object's [`Behavior::focus`] hook.
    pub fn focus(&mut self, id: ObjectId) {
        self.validate(id);
        if let Some(b) = &mut self.behavior[id.idx as usize] {
            b.focus();
        }
    }

    /// Calls the object's [`Behavior::defocus`] hook.
    pub fn defocus(&mut self, id: ObjectId) {
        self.validate(id);
        if let Some(b) = &mut self.behavior[id.idx as usize] {
            b.defocus();
        }
    }

    pub(crate) fn refresh_at(&mut self, idx: u32) {
        let i = idx as usize;
        if self.is_list[i] {
            let tiler = self.tiler[i];
            let mut cur = self.first[i];
            while cur != INVALID {
                self.tiler[cur as usize] = tiler;
                self.refresh_at(cur);
                cur = self.next[cur as usize];
            }
        } else if let Some(t) = self.tiler[i] {
            let rect = self.rect[i];
            self.tilers[t.0 as usize].refresh_world(rect);
            self.stats.invalidated += 1;
            #[cfg(feature = "trace-rich")]
            if self.pending_invalidations.len() < Self::MAX_PENDING_RECORDS {
                self.pending_invalidations.push(InvalidationRect {
                    object_index: idx,
                    tiler: t,
                    rect,
                });
            }
        }
    }

    fn update_at(&mut self, idx: u32) {
        let i = idx as usize;
        if let Some(mut behavior) = self.behavior[i].take() {
            let id = self.id_at(idx);
            behavior.update(&mut ObjectMut { store: self, id });
            self.stats.updated += 1;
            // The hook may have destroyed its own object or installed a
            // replacement behaviour.
            if self.is_alive(id) && self.behavior[i].is_none() {
                self.behavior[i] = Some(behavior);
            }
        }
        if self.is_list[i] {
            let mut cur = self.first[i];
            while cur != INVALID {
                self.update_at(cur);
                cur = self.next[cur as usize];
            }
        }
    }

    fn draw_at(&mut self, idx: u32) {
        let i = idx as usize;
        if let (Some(behavior), Some(t)) = (&self.behavior[i], self.tiler[i]) {
            behavior.draw(self.rect[i], &mut self.tilers[t.0 as usize]);
            self.stats.drawn += 1;
        }
        if self.is_list[i] {
            let mut cur = self.first[i];
            while cur != INVALID {
                self.draw_at(cur);
                cur = self.next[cur as usize];
            }
        }
    }
}

/// Integer midpoint, truncating toward the first coordinate.
#[inline]
const fn mid(a: i32, b: i32) -> i32 {
    (a + b) >> 1
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;

    use super::*;
    use crate::tiler::DamageLog;

    fn store_with_log() -> (ObjectStore<DamageLog>, TilerId) {
        let mut store = ObjectStore::new();
        let tiler = store.attach_tiler(DamageLog::new());
        (store, tiler)
    }

    #[test]
    fn create_and_destroy() {
        let mut store = ObjectStore::<DamageLog>::new();
        let id = store.create_object_at(Point::new(3, 4));
        assert!(store.is_alive(id));
        store.destroy_object(id);
        assert!(!store.is_alive(id));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = ObjectStore::<DamageLog>::new();
        let id1 = store.create_object_at(Point::ZERO);
        store.destroy_object(id1);
        let id2 = store.create_object_at(Point::ZERO);
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn default_size_is_one_pixel() {
        let mut store = ObjectStore::<DamageLog>::new();
        let id = store.create_object_at(Point::new(7, 9));
        assert_eq!(store.width(id), 1);
        assert_eq!(store.height(id), 1);
        assert_eq!(store.rect(id).p1, store.rect(id).p2);
    }

    #[test]
    fn derived_points_truncate_toward_p1() {
        let mut store = ObjectStore::<DamageLog>::new();
        // 4×3 at (10, 20): p2 = (13, 22).
        let id = store.create_object(Point::new(10, 20), Point::new(4, 3));
        assert_eq!(store.center(id), Point::new(11, 21));
        assert_eq!(store.top(id), Point::new(11, 20));
        assert_eq!(store.bottom(id), Point::new(11, 22));
        assert_eq!(store.left(id), Point::new(10, 21));
        assert_eq!(store.right(id), Point::new(13, 21));
        assert_eq!(store.x(id), 10);
        assert_eq!(store.y(id), 20);
        assert_eq!(store.position(id), Point::new(10, 20));
    }

    #[test]
    fn unattached_object_moves_silently() {
        let (mut store, tiler) = store_with_log();
        let id = store.create_object(Point::ZERO, Point::new(2, 2));
        store.move_to(id, Point::new(5, 5));
        store.resize(id, Point::new(3, 3));
        store.refresh(id);
        assert!(store.tiler(tiler).is_empty());
        assert_eq!(store.rect(id), Rect::new(Point::new(5, 5), Point::new(7, 7)));
    }

    #[test]
    fn move_to_refreshes_old_then_new() {
        let (mut store, tiler) = store_with_log();
        let id = store.create_object(Point::new(1, 1), Point::new(2, 2));
        store.set_tiler(id, Some(tiler));
        let before = store.rect(id);

        store.move_to(id, Point::new(10, 0));
        let after = store.rect(id);

        assert_eq!(after.size(), before.size());
        assert_eq!(store.tiler(tiler).rects(), &[before, after]);
    }

    #[test]
    fn move_by_round_trip_restores_footprint() {
        let (mut store, tiler) = store_with_log();
        let id = store.create_object(Point::new(4, 4), Point::new(3, 5));
        store.set_tiler(id, Some(tiler));
        let original = store.rect(id);

        store.move_by(id, Point::new(7, -2));
        store.move_by(id, Point::new(-7, 2));

        assert_eq!(store.rect(id), original);
        assert_eq!(store.tiler(tiler).rects().len(), 4);
    }

    #[test]
    fn resize_refreshes_both_footprints_and_keeps_origin() {
        let (mut store, tiler) = store_with_log();
        let id = store.create_object(Point::new(2, 3), Point::new(4, 4));
        store.set_tiler(id, Some(tiler));

        store.resize(id, Point::new(8, 2));

        assert_eq!(
            store.tiler(tiler).rects(),
            &[
                Rect::new(Point::new(2, 3), Point::new(5, 6)),
                Rect::new(Point::new(2, 3), Point::new(9, 4)),
            ]
        );
    }

    #[test]
    fn set_size_after_resize_restores_without_refresh() {
        let (mut store, tiler) = store_with_log();
        let id = store.create_object(Point::ZERO, Point::new(5, 6));
        store.set_tiler(id, Some(tiler));

        store.resize(id, Point::new(9, 9));
        let calls = store.tiler(tiler).rects().len();
        store.set_size(id, Point::new(5, 6));

        assert_eq!(store.width(id), 5);
        assert_eq!(store.height(id), 6);
        assert_eq!(store.tiler(tiler).rects().len(), calls);
    }

    #[test]
    fn set_pos_is_silent() {
        let (mut store, tiler) = store_with_log();
        let id = store.create_object(Point::ZERO, Point::new(2, 2));
        store.set_tiler(id, Some(tiler));
        store.set_pos(id, Point::new(-4, 8));
        assert!(store.tiler(tiler).is_empty());
        assert_eq!(store.position(id), Point::new(-4, 8));
    }

    #[test]
    fn update_hook_can_move_its_object() {
        struct Drift;
        impl Behavior<DamageLog> for Drift {
            fn update(&mut self, object: &mut ObjectMut<'_, DamageLog>) {
                object.move_by(Point::new(1, 0));
            }
        }

        let (mut store, tiler) = store_with_log();
        let id = store.create_object(Point::ZERO, Point::new(2, 2));
        store.set_tiler(id, Some(tiler));
        store.set_behavior(id, Drift);

        store.update(id);
        store.update(id);

        assert_eq!(store.position(id), Point::new(2, 0));
        assert_eq!(store.tiler(tiler).rects().len(), 4);
        assert!(store.take_behavior(id).is_some(), "behavior is restored");
    }

    #[test]
    fn draw_skips_objects_without_tiler() {
        struct Counter(Rc<Cell<u32>>);
        impl Behavior<DamageLog> for Counter {
            fn draw(&self, _rect: Rect, _tiler: &mut DamageLog) {
                self.0.set(self.0.get() + 1);
            }
        }

        let (mut store, tiler) = store_with_log();
        let draws = Rc::new(Cell::new(0));
        let id = store.create_object_at(Point::ZERO);
        store.set_behavior(id, Counter(draws.clone()));

        store.draw(id);
        assert_eq!(draws.get(), 0);

        store.set_tiler(id, Some(tiler));
        store.draw(id);
        assert_eq!(draws.get(), 1);
    }

    #[test]
    fn focus_hooks_dispatch() {
        struct Focusable(Rc<Cell<bool>>);
        impl Behavior<DamageLog> for Focusable {
            fn focus(&mut self) {
                self.0.set(true);
            }
            fn defocus(&mut self) {
                self.0.set(false);
            }
        }

        let mut store = ObjectStore::<DamageLog>::new();
        let focused = Rc::new(Cell::new(false));
        let id = store.create_object_at(Point::ZERO);
        store.set_behavior(id, Focusable(focused.clone()));

        store.focus(id);
        assert!(focused.get());
        store.defocus(id);
        assert!(!focused.get());
    }

    #[test]
    fn multiple_tilers_are_independent() {
        let mut store = ObjectStore::new();
        let a = store.attach_tiler(DamageLog::new());
        let b = store.attach_tiler(DamageLog::new());
        let obj = store.create_object_at(Point::new(1, 1));

        store.set_tiler(obj, Some(b));
        store.refresh(obj);

        assert!(store.tiler(a).is_empty());
        assert_eq!(store.tiler(b).rects(), vec![store.rect(obj)].as_slice());
        assert_eq!(store.tiler_of(obj), Some(b));
        store.tiler_mut(b).clear();
        assert!(store.tiler(b).is_empty());
    }

    #[test]
    #[should_panic(expected = "stale ObjectId")]
    fn destroyed_handle_panics_on_rect() {
        let mut store = ObjectStore::<DamageLog>::new();
        let id = store.create_object_at(Point::ZERO);
        store.destroy_object(id);
        let _ = store.rect(id);
    }

    #[test]
    #[should_panic(expected = "stale ObjectId")]
    fn destroyed_handle_panics_on_move() {
        let mut store = ObjectStore::<DamageLog>::new();
        let id = store.create_object_at(Point::ZERO);
        store.destroy_object(id);
        store.move_to(id, Point::ONE);
    }

    #[test]
    #[should_panic(expected = "unknown TilerId")]
    fn foreign_tiler_handle_panics() {
        let mut store = ObjectStore::<DamageLog>::new();
        let id = store.create_object_at(Point::ZERO);
        store.set_tiler(id, Some(TilerId(3)));
    }

    #[cfg(feature = "trace-rich")]
    #[test]
    fn rich_buffers_stay_bounded_without_frames() {
        let (mut store, tiler) = store_with_log();
        let root = store.create_list(Point::ZERO, Point::new(8, 8));
        store.set_tiler(root, Some(tiler));
        let a = store.create_object_at(Point::ONE);
        store.add(root, a).unwrap();

        for _ in 0..10_000 {
            store.update(root);
            store.refresh(root);
            store.draw(root);
            store.tiler_mut(tiler).clear();
        }
        assert_eq!(
            store.pending_invalidations.len(),
            ObjectStore::<DamageLog>::MAX_PENDING_RECORDS
        );
        assert_eq!(store.pending_membership.len(), 1);

        store.clear_trace_records();
        assert!(store.pending_invalidations.is_empty());
        assert!(store.pending_membership.is_empty());
        assert_eq!(store.stats, FrameSummary::default());
    }
}
