// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intrusive object lists.
//!
//! A list links existing objects through the store's `next` column; it never
//! allocates or frees them. Joining a list hands the member the list's tiler
//! and invalidates the member's area once; leaving invalidates it once more
//! and detaches the tiler.
//!
//! There is no tail pointer: [`add`](ObjectStore::add) and
//! [`prev`](ObjectStore::prev) walk from the head. Lists on small displays
//! hold a handful of objects, so the walk is cheaper than keeping a second
//! link per object.

use core::fmt;

use crate::tiler::Tiler;
#[cfg(feature = "trace-rich")]
use crate::trace::{MembershipChange, MembershipKind};

use super::id::{INVALID, ObjectId};
use super::store::ObjectStore;
use super::traverse::Members;

/// Why a list operation was rejected. The store is unchanged in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MembershipError {
    /// The object handle is stale (destroyed, or never issued).
    NotAlive,
    /// The object is already a member of this list.
    AlreadyMember,
    /// The object is a member of a different list.
    LinkedElsewhere,
    /// The object is the list itself or one of the lists containing it.
    WouldCycle,
    /// The list has no members.
    EmptyList,
    /// The object is not a member of this list.
    NotMember,
}

impl fmt::Display for MembershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAlive => write!(f, "object handle is stale"),
            Self::AlreadyMember => write!(f, "object is already a member of this list"),
            Self::LinkedElsewhere => write!(f, "object is a member of another list"),
            Self::WouldCycle => write!(f, "list cannot contain itself or an ancestor"),
            Self::EmptyList => write!(f, "list is empty"),
            Self::NotMember => write!(f, "object is not a member of this list"),
        }
    }
}

impl core::error::Error for MembershipError {}

impl<T> ObjectStore<T> {
    /// Returns whether `object` is a member of `list`.
    ///
    /// Identity walk from the head, O(n). A stale `object` is never a member.
    ///
    /// # Panics
    ///
    /// Panics if `list` is stale or not a list.
    #[must_use]
    pub fn has(&self, list: ObjectId, object: ObjectId) -> bool {
        self.validate_list(list);
        self.is_alive(object) && self.members(list).any(|m| m == object)
    }

    /// Returns an iterator over the members of `list`, head to tail.
    #[must_use]
    pub fn members(&self, list: ObjectId) -> Members<'_, T> {
        self.validate_list(list);
        Members::new(self, self.first[list.idx as usize])
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self, list: ObjectId) -> usize {
        self.members(list).count()
    }

    /// Returns `true` if the list has no members.
    #[must_use]
    pub fn is_empty(&self, list: ObjectId) -> bool {
        self.validate_list(list);
        self.first[list.idx as usize] == INVALID
    }

    /// Returns the member after `prev`, or the head when `prev` is `None`.
    ///
    /// Returns `None` past the tail, and for a `prev` that is not a member
    /// of `list`.
    #[must_use]
    pub fn next(&self, list: ObjectId, prev: Option<ObjectId>) -> Option<ObjectId> {
        self.validate_list(list);
        let n = match prev {
            None => self.first[list.idx as usize],
            Some(p) => {
                if !self.is_alive(p) || self.owner[p.idx as usize] != list.idx {
                    return None;
                }
                self.next[p.idx as usize]
            }
        };
        (n != INVALID).then(|| self.id_at(n))
    }

    /// Returns the member whose successor is `curr`.
    ///
    /// With `None` this is the last member. The head has no predecessor, and
    /// an empty list yields `None` for any input. Walks from the head.
    #[must_use]
    pub fn prev(&self, list: ObjectId, curr: Option<ObjectId>) -> Option<ObjectId> {
        self.validate_list(list);
        let target = match curr {
            None => INVALID,
            Some(c) if self.is_alive(c) => c.idx,
            Some(_) => return None,
        };
        let mut p = self.first[list.idx as usize];
        while p != INVALID {
            if self.next[p as usize] == target {
                return Some(self.id_at(p));
            }
            p = self.next[p as usize];
        }
        None
    }

    /// Checks every precondition shared by [`add`](Self::add) and
    /// [`insert`](Self::insert).
    fn check_joinable(&self, list: ObjectId, object: ObjectId) -> Result<(), MembershipError> {
        self.validate_list(list);
        if !self.is_alive(object) {
            return Err(MembershipError::NotAlive);
        }
        if self.has(list, object) {
            return Err(MembershipError::AlreadyMember);
        }
        if self.owner[object.idx as usize] != INVALID {
            return Err(MembershipError::LinkedElsewhere);
        }
        // Walk up through the hosting lists; meeting `object` means it
        // contains `list`.
        let mut cur = list.idx;
        while cur != INVALID {
            if cur == object.idx {
                return Err(MembershipError::WouldCycle);
            }
            cur = self.owner[cur as usize];
        }
        Ok(())
    }

    /// Clears the tiler of `idx` and, for a list, of everything below it.
    fn detach_at(&mut self, idx: u32) {
        self.tiler[idx as usize] = None;
        if self.is_list[idx as usize] {
            let mut cur = self.first[idx as usize];
            while cur != INVALID {
                self.detach_at(cur);
                cur = self.next[cur as usize];
            }
        }
    }

    #[cfg(feature = "trace-rich")]
    fn record_membership(&mut self, list: u32, object: u32, kind: MembershipKind) {
        if self.pending_membership.len() < Self::MAX_PENDING_RECORDS {
            self.pending_membership.push(MembershipChange {
                list_index: list,
                object_index: object,
                kind,
            });
        }
    }
}

impl<T: Tiler> ObjectStore<T> {
    /// Appends `object` at the tail of `list` and invalidates its area.
    ///
    /// The object takes over the list's tiler before the refresh, so the
    /// newly occupied area is reported exactly once.
    ///
    /// # Errors
    ///
    /// [`NotAlive`](MembershipError::NotAlive),
    /// [`AlreadyMember`](MembershipError::AlreadyMember),
    /// [`LinkedElsewhere`](MembershipError::LinkedElsewhere), or
    /// [`WouldCycle`](MembershipError::WouldCycle).
    pub fn add(&mut self, list: ObjectId, object: ObjectId) -> Result<(), MembershipError> {
        self.check_joinable(list, object)?;
        let (l, o) = (list.idx as usize, object.idx);

        self.next[o as usize] = INVALID;
        self.tiler[o as usize] = self.tiler[l];
        self.owner[o as usize] = list.idx;
        if self.first[l] == INVALID {
            self.first[l] = o;
        } else {
            // Walk to the tail.
            let mut last = self.first[l];
            while self.next[last as usize] != INVALID {
                last = self.next[last as usize];
            }
            self.next[last as usize] = o;
        }

        #[cfg(feature = "trace-rich")]
        self.record_membership(list.idx, o, MembershipKind::Added);
        self.refresh_at(o);
        Ok(())
    }

    /// Prepends `object` at the head of `list` and invalidates its area.
    ///
    /// The object is drawn below every existing member.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn insert(&mut self, list: ObjectId, object: ObjectId) -> Result<(), MembershipError> {
        self.check_joinable(list, object)?;
        let (l, o) = (list.idx as usize, object.idx);

        self.next[o as usize] = self.first[l];
        self.tiler[o as usize] = self.tiler[l];
        self.owner[o as usize] = list.idx;
        self.first[l] = o;

        #[cfg(feature = "trace-rich")]
        self.record_membership(list.idx, o, MembershipKind::Inserted);
        self.refresh_at(o);
        Ok(())
    }

    /// Unlinks `object` from `list`.
    ///
    /// The area the object occupied is invalidated while it still reports to
    /// the list's tiler; afterwards its link and tiler are cleared. Removing a
    /// nested list detaches its whole sub-tree.
    ///
    /// # Errors
    ///
    /// [`EmptyList`](MembershipError::EmptyList),
    /// [`NotAlive`](MembershipError::NotAlive), or
    /// [`NotMember`](MembershipError::NotMember).
    pub fn remove(&mut self, list: ObjectId, object: ObjectId) -> Result<(), MembershipError> {
        self.validate_list(list);
        let l = list.idx as usize;
        if self.first[l] == INVALID {
            return Err(MembershipError::EmptyList);
        }
        if !self.is_alive(object) {
            return Err(MembershipError::NotAlive);
        }
        let o = object.idx;

        if self.first[l] == o {
            self.refresh_at(o);
            self.first[l] = self.next[o as usize];
        } else {
            let mut p = self.first[l];
            loop {
                let n = self.next[p as usize];
                if n == INVALID {
                    return Err(MembershipError::NotMember);
                }
                if n == o {
                    self.refresh_at(o);
                    self.next[p as usize] = self.next[o as usize];
                    break;
                }
                p = n;
            }
        }

        self.next[o as usize] = INVALID;
        self.owner[o as usize] = INVALID;
        self.detach_at(o);
        #[cfg(feature = "trace-rich")]
        self.record_membership(list.idx, o, MembershipKind::Removed);
        Ok(())
    }
}
