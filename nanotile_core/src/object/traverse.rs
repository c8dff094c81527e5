// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List traversal utilities.

use super::id::{INVALID, ObjectId};
use super::store::ObjectStore;

/// An iterator over the members of an object list, head to tail.
///
/// Created by [`ObjectStore::members`]. The order is the draw order: later
/// members are drawn on top of earlier ones.
pub struct Members<'a, T> {
    store: &'a ObjectStore<T>,
    current: u32,
}

impl<'a, T> Members<'a, T> {
    pub(crate) fn new(store: &'a ObjectStore<T>, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl<T> core::fmt::Debug for Members<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Members")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<T> Iterator for Members<'_, T> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<ObjectId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next[idx as usize];
        Some(self.store.id_at(idx))
    }
}
