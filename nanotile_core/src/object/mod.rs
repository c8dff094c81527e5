// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object store and object lists.
//!
//! An *object* is a positioned, resizable rectangle on the display. Each
//! object has:
//!
//! - An identity ([`ObjectId`]): a generational handle that becomes stale when
//!   the object is destroyed, preventing use-after-free bugs at the API level.
//! - A footprint ([`rect`](ObjectStore::rect)) with inclusive corners.
//! - An optional tiler association ([`tiler_of`](ObjectStore::tiler_of)),
//!   managed by the list that hosts the object.
//! - An optional [`Behavior`] supplying `update`, `draw`, and focus hooks.
//!
//! Objects created with [`create_list`](ObjectStore::create_list) are also
//! *object lists*: intrusive, singly-linked, unordered collections of other
//! objects. Lists nest, and member order is draw order.
//!
//! # Invalidation protocol
//!
//! Every geometric change tells the tiler which areas went stale:
//!
//! | operation | `refresh_world` calls |
//! |-----------|-----------------------|
//! | [`move_to`](ObjectStore::move_to), [`move_by`](ObjectStore::move_by), [`resize`](ObjectStore::resize) | old footprint, then new footprint |
//! | [`add`](ObjectStore::add), [`insert`](ObjectStore::insert) | new footprint, once |
//! | [`remove`](ObjectStore::remove) | footprint at removal, once, before the tiler is detached |
//! | [`set_pos`](ObjectStore::set_pos), [`set_size`](ObjectStore::set_size) | none |
//!
//! Objects without a tiler track geometry silently. For a list, "its
//! footprint" means the footprints of its members (see
//! [`refresh`](ObjectStore::refresh)).

mod behavior;
mod frame;
mod id;
mod list;
mod store;
mod traverse;

pub use behavior::{Behavior, ObjectMut};
pub use id::{INVALID, ObjectId};
pub use list::MembershipError;
pub use store::ObjectStore;
pub use traverse::Members;
