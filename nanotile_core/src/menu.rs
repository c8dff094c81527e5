// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical menus built on object lists.
//!
//! A [`Menu`] owns one object list and remembers which member is selected.
//! Items are ordinary objects; they learn about selection through their
//! [`Behavior::focus`](crate::object::Behavior::focus) and
//! [`Behavior::defocus`](crate::object::Behavior::defocus) hooks.
//!
//! Items are stacked top to bottom in list order. Each time the item set
//! changes the layout is recomputed, and every item that moves reports both
//! the area it left and the area it now covers.

use alloc::vec::Vec;

use crate::geometry::{Point, Rect};
use crate::object::{MembershipError, ObjectId, ObjectStore};
use crate::tiler::Tiler;

/// Spacing parameters for menu layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuStyle {
    /// Gap between the menu edge and its items, on every side.
    pub inset: i32,
    /// Vertical gap between consecutive items.
    pub spacing: i32,
    /// Extra rows below the last item of a [`MenuLayout::List`] menu.
    pub footer: i32,
}

impl MenuStyle {
    /// Default spacing: 4 px inset, 1 px between items, 7 px footer.
    pub const DEFAULT: Self = Self {
        inset: 4,
        spacing: 1,
        footer: 7,
    };
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How a menu sizes itself and its items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuLayout {
    /// Items keep their own widths. The menu is `width` pixels wide and
    /// grows vertically to fit its items.
    List {
        /// Menu width in pixels, usually the display width.
        width: i32,
    },
    /// The menu has a fixed size and every item is stretched to the inner
    /// width.
    FixedWidth {
        /// Menu size in pixels.
        size: Point,
    },
}

/// A vertical menu with a single selected item.
#[derive(Clone, Debug)]
pub struct Menu {
    list: ObjectId,
    selected: Option<ObjectId>,
    layout: MenuLayout,
    style: MenuStyle,
}

impl Menu {
    /// Creates an empty menu at `pos` with the default style.
    pub fn new<T: Tiler>(store: &mut ObjectStore<T>, pos: Point, layout: MenuLayout) -> Self {
        Self::with_style(store, pos, layout, MenuStyle::DEFAULT)
    }

    /// Creates an empty menu at `pos`.
    pub fn with_style<T: Tiler>(
        store: &mut ObjectStore<T>,
        pos: Point,
        layout: MenuLayout,
        style: MenuStyle,
    ) -> Self {
        let size = match layout {
            MenuLayout::List { width } => Point::new(width, 1),
            MenuLayout::FixedWidth { size } => size,
        };
        let menu = Self {
            list: store.create_list(pos, size),
            selected: None,
            layout,
            style,
        };
        menu.relayout(store);
        menu
    }

    /// The object list backing the menu. Add it to a parent list (or bind a
    /// tiler to it) to put the menu on screen.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.list
    }

    /// The selected item, if any.
    #[must_use]
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Appends an item.
    ///
    /// The item is updated once so it can initialise itself, then every item
    /// is laid out again. The first item ever added becomes selected.
    ///
    /// # Errors
    ///
    /// Any error from [`ObjectStore::add`]; the menu is unchanged.
    pub fn add<T: Tiler>(
        &mut self,
        store: &mut ObjectStore<T>,
        item: ObjectId,
    ) -> Result<(), MembershipError> {
        store.add(self.list, item)?;
        self.adopt(store, item);
        Ok(())
    }

    /// Prepends an item. Otherwise behaves like [`add`](Self::add).
    ///
    /// # Errors
    ///
    /// Any error from [`ObjectStore::insert`]; the menu is unchanged.
    pub fn insert<T: Tiler>(
        &mut self,
        store: &mut ObjectStore<T>,
        item: ObjectId,
    ) -> Result<(), MembershipError> {
        store.insert(self.list, item)?;
        self.adopt(store, item);
        Ok(())
    }

    /// Removes an item. If it was selected, the first remaining item takes
    /// over the selection.
    ///
    /// # Errors
    ///
    /// Any error from [`ObjectStore::remove`]; the menu is unchanged.
    pub fn remove<T: Tiler>(
        &mut self,
        store: &mut ObjectStore<T>,
        item: ObjectId,
    ) -> Result<(), MembershipError> {
        store.remove(self.list, item)?;
        if self.selected == Some(item) {
            store.defocus(item);
            self.selected = store.next(self.list, None);
            if let Some(s) = self.selected {
                store.focus(s);
            }
        }
        self.relayout(store);
        Ok(())
    }

    /// Selects the next item, wrapping from the last to the first.
    ///
    /// A selection that has left the menu behind its back counts as no
    /// selection, so the first item is picked.
    pub fn down<T: Tiler>(&mut self, store: &mut ObjectStore<T>) {
        let current = self.live_selection(store);
        if let Some(s) = current {
            store.defocus(s);
        }
        self.selected = store
            .next(self.list, current)
            .or_else(|| store.next(self.list, None));
        if let Some(s) = self.selected {
            store.focus(s);
        }
    }

    /// Selects the previous item, wrapping from the first to the last.
    pub fn up<T: Tiler>(&mut self, store: &mut ObjectStore<T>) {
        let current = self.live_selection(store);
        if let Some(s) = current {
            store.defocus(s);
        }
        self.selected = store
            .prev(self.list, current)
            .or_else(|| store.prev(self.list, None));
        if let Some(s) = self.selected {
            store.focus(s);
        }
    }

    /// The selection, if it is still alive and still one of our items.
    fn live_selection<T>(&self, store: &ObjectStore<T>) -> Option<ObjectId> {
        self.selected
            .filter(|&s| store.is_alive(s) && store.owner(s) == Some(self.list))
    }

    fn adopt<T: Tiler>(&mut self, store: &mut ObjectStore<T>, item: ObjectId) {
        store.update(item);
        self.relayout(store);
        if self.live_selection(store).is_none() {
            self.selected = Some(item);
            store.focus(item);
        }
    }

    /// Positions every item. An item that changes place or size reports its
    /// old footprint, then its new one, the same way
    /// [`ObjectStore::move_to`] does.
    fn relayout<T: Tiler>(&self, store: &mut ObjectStore<T>) {
        let inner = store.rect(self.list).inset(self.style.inset);
        let items: Vec<ObjectId> = store.members(self.list).collect();

        let mut y = inner.p1.y;
        for item in items {
            let old = store.rect(item);
            let size = match self.layout {
                MenuLayout::List { .. } => old.size(),
                MenuLayout::FixedWidth { .. } => Point::new(inner.width(), old.height()),
            };
            let new = Rect::from_origin_size(Point::new(inner.p1.x, y), size);
            if new != old {
                store.refresh(item);
                store.set_pos(item, new.p1);
                store.set_size(item, size);
                store.refresh(item);
            }
            y = new.p2.y + 1 + self.style.spacing;
        }

        if let MenuLayout::List { width } = self.layout {
            let top = store.y(self.list);
            let height = y + self.style.footer - top + 1;
            store.set_size(self.list, Point::new(width, height));
        }
    }
}
