// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object identity.

use core::fmt;

/// Sentinel value meaning "no object" in link and owner columns.
pub const INVALID: u32 = u32::MAX;

/// A handle to an object in an [`ObjectStore`](super::ObjectStore).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after an object is destroyed and the slot is reused. A
/// stale handle is what list operations report as
/// [`NotAlive`](super::MembershipError::NotAlive).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter, must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl ObjectId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}@gen{})", self.idx, self.generation)
    }
}
