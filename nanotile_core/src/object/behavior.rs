// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-object behaviour hooks.

use crate::geometry::{Point, Rect};
use crate::tiler::Tiler;

use super::id::ObjectId;
use super::store::ObjectStore;

/// The capability set of a concrete object: sprites, menu items, widgets.
///
/// Every method defaults to a no-op, so a plain positioned object needs no
/// behaviour at all. Attach one with
/// [`ObjectStore::set_behavior`](ObjectStore::set_behavior).
///
/// `T` is the tiler type of the store. Drawing receives the tiler the object
/// is currently attached to, so implementations can reach the canvas it
/// exposes.
pub trait Behavior<T> {
    /// Advances the object by one frame.
    ///
    /// The hook may move or resize its own object through `object`; those
    /// changes invalidate areas like any other geometry change.
    fn update(&mut self, object: &mut ObjectMut<'_, T>) {
        _ = object;
    }

    /// Draws the object. `rect` is its current footprint.
    fn draw(&self, rect: Rect, tiler: &mut T) {
        _ = (rect, tiler);
    }

    /// The object became the active item of a menu.
    fn focus(&mut self) {}

    /// The object stopped being the active item of a menu.
    fn defocus(&mut self) {}
}

/// Mutable access to one object from inside its [`Behavior::update`] hook.
pub struct ObjectMut<'a, T> {
    pub(crate) store: &'a mut ObjectStore<T>,
    pub(crate) id: ObjectId,
}

impl<T> core::fmt::Debug for ObjectMut<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectMut")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<T: Tiler> ObjectMut<'_, T> {
    /// The handle of the object being updated.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Current footprint.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.store.rect(self.id)
    }

    /// See [`ObjectStore::move_to`].
    pub fn move_to(&mut self, p: Point) {
        self.store.move_to(self.id, p);
    }

    /// See [`ObjectStore::move_by`].
    pub fn move_by(&mut self, delta: Point) {
        self.store.move_by(self.id, delta);
    }

    /// See [`ObjectStore::resize`].
    pub fn resize(&mut self, size: Point) {
        self.store.resize(self.id, size);
    }

    /// See [`ObjectStore::set_pos`].
    pub fn set_pos(&mut self, p: Point) {
        self.store.set_pos(self.id, p);
    }

    /// See [`ObjectStore::set_size`].
    pub fn set_size(&mut self, size: Point) {
        self.store.set_size(self.id, size);
    }

    /// See [`ObjectStore::refresh`].
    pub fn refresh(&mut self) {
        self.store.refresh(self.id);
    }

    /// The whole store, for hooks that manage other objects.
    pub fn store(&mut self) -> &mut ObjectStore<T> {
        self.store
    }
}
