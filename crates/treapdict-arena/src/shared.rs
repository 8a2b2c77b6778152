//! Reference-counted arena handles.
//!
//! A [`SharedArena`] lets several dictionaries allocate from one
//! [`NodeArena`]. The arena lives as long as its longest-lived holder and
//! is released (slot table and priority generator together) when the last
//! handle is dropped.
//!
//! The handle is `Rc<_>` over `RefCell`s, so it is neither `Send` nor
//! `Sync`: sharing an arena across threads is rejected at compile time
//! rather than guarded by a lock.
//!
//! A tree whose owner goes away while the arena is borrowed cannot be freed
//! on the spot. Its root is parked with [`SharedArena::defer_release`] and
//! the whole tree is freed by the next [`SharedArena::borrow_mut`] or
//! successful [`SharedArena::try_borrow_mut`].

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use treapdict_core::SlotIndex;

use crate::arena::NodeArena;
use crate::config::ArenaConfig;

/// The shared allocation behind a [`SharedArena`].
pub(crate) struct ArenaCell<K, V> {
    arena: RefCell<NodeArena<K, V>>,
    /// Roots of orphaned trees waiting to be freed.
    pending: RefCell<Vec<SlotIndex>>,
}

/// Shared, single-threaded handle to a [`NodeArena`].
pub struct SharedArena<K, V> {
    inner: Rc<ArenaCell<K, V>>,
}

impl<K, V> SharedArena<K, V> {
    /// Create a new arena and wrap it in a handle.
    pub fn new(config: &ArenaConfig) -> Self {
        Self::from_arena(NodeArena::new(config))
    }

    /// Wrap an existing arena.
    pub fn from_arena(arena: NodeArena<K, V>) -> Self {
        Self {
            inner: Rc::new(ArenaCell {
                arena: RefCell::new(arena),
                pending: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Borrow the arena for reading.
    ///
    /// Trees parked by [`defer_release`](Self::defer_release) are still
    /// counted as live until the next mutable borrow.
    ///
    /// # Panics
    ///
    /// Panics if the arena is currently borrowed mutably.
    pub fn borrow(&self) -> Ref<'_, NodeArena<K, V>> {
        self.inner.arena.borrow()
    }

    /// Borrow the arena for writing, first freeing any parked trees.
    ///
    /// # Panics
    ///
    /// Panics if any other borrow of the arena is alive.
    pub fn borrow_mut(&self) -> RefMut<'_, NodeArena<K, V>> {
        let mut arena = self.inner.arena.borrow_mut();
        self.release_pending(&mut arena);
        arena
    }

    /// Borrow the arena for writing, or `None` if it is already borrowed.
    pub fn try_borrow_mut(&self) -> Option<RefMut<'_, NodeArena<K, V>>> {
        let mut arena = self.inner.arena.try_borrow_mut().ok()?;
        self.release_pending(&mut arena);
        Some(arena)
    }

    /// Park the tree rooted at `root` until the arena can be borrowed
    /// mutably again.
    ///
    /// The caller must have unlinked `root` from every dictionary.
    pub fn defer_release(&self, root: SlotIndex) {
        self.inner.pending.borrow_mut().push(root);
    }

    /// Number of parked trees not yet freed.
    pub fn pending_release_count(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    /// Number of live handles to this arena.
    pub fn holder_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Whether two handles point at the same arena.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> Weak<ArenaCell<K, V>> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn from_rc(inner: Rc<ArenaCell<K, V>>) -> Self {
        Self { inner }
    }

    fn release_pending(&self, arena: &mut NodeArena<K, V>) {
        // Taken out first: freeing drops values, which may park more trees.
        let pending = mem::take(&mut *self.inner.pending.borrow_mut());
        for root in pending {
            arena.free_tree(Some(root));
        }
    }
}

impl<K, V> Clone for SharedArena<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for SharedArena<K, V> {
    fn default() -> Self {
        Self::new(&ArenaConfig::default())
    }
}

impl<K, V> fmt::Debug for SharedArena<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.arena.try_borrow() {
            Ok(arena) => f
                .debug_struct("SharedArena")
                .field("capacity", &arena.capacity())
                .field("live", &arena.live_count())
                .field("pending", &self.pending_release_count())
                .field("holders", &self.holder_count())
                .finish(),
            Err(_) => f
                .debug_struct("SharedArena")
                .field("holders", &self.holder_count())
                .finish_non_exhaustive(),
        }
    }
}
