//! The public dictionary type.
//!
//! A [`TreapDict`] is a root slot plus a handle to the arena its nodes
//! live in. All structural work is delegated to [`crate::treap`]; this
//! module decides when slots are allocated, filled and released.

use std::cell::{Ref, RefMut};
use std::fmt;

use log::debug;
use treapdict_arena::{shared_arena, ArenaConfig, NodeArena, SharedArena};
use treapdict_core::{DictError, InvariantViolation, SlotIndex};

use crate::treap::{self, InOrder, Placement};
use crate::validate;

/// Ordered key/value dictionary backed by an arena-resident treap.
///
/// Lookups hand out [`Ref`]/[`RefMut`] guards into the arena. When several
/// dictionaries share one arena, a guard from one must be dropped before
/// another dictionary on that arena is mutated; otherwise the mutation
/// panics with a borrow error.
///
/// # Example
///
/// ```rust
/// use treapdict_engine::TreapDict;
///
/// let mut dict = TreapDict::with_capacity(4);
/// dict.insert(5, "five");
/// *dict.slot(3) = "three";
///
/// assert_eq!(*dict.search(&5).unwrap(), "five");
/// assert!(dict.search(&4).is_err());
/// assert_eq!(dict.len(), 2);
/// ```
pub struct TreapDict<K, V> {
    root: Option<SlotIndex>,
    arena: SharedArena<K, V>,
}

impl<K: Ord, V> TreapDict<K, V> {
    /// Empty dictionary with a private arena of default capacity.
    pub fn new() -> Self {
        Self::with_config(&ArenaConfig::default())
    }

    /// Empty dictionary with a private arena of `capacity` slots.
    pub fn with_capacity(capacity: u32) -> Self {
        Self::with_config(&ArenaConfig::new(capacity))
    }

    /// Empty dictionary with a private arena built from `config`.
    pub fn with_config(config: &ArenaConfig) -> Self {
        Self::new_in(&SharedArena::new(config))
    }

    /// Empty dictionary allocating from an existing arena.
    pub fn new_in(arena: &SharedArena<K, V>) -> Self {
        Self {
            root: None,
            arena: arena.clone(),
        }
    }

    /// Empty dictionary allocating from the thread's shared arena for this
    /// key/value type pair.
    ///
    /// `capacity` only applies if no such arena is alive yet; otherwise it
    /// is ignored and the live arena is reused.
    pub fn shared(capacity: u32) -> Self
    where
        K: 'static,
        V: 'static,
    {
        Self::new_in(&shared_arena(&ArenaConfig::new(capacity)))
    }

    /// Whether the dictionary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.arena.borrow().stats(self.root).0 as usize
    }

    /// Height of the tree, or `None` when the dictionary is empty.
    pub fn height(&self) -> Option<u32> {
        self.root.map(|root| self.arena.borrow().node(root).height())
    }

    /// Value stored under `key`.
    pub fn search(&self, key: &K) -> Result<Ref<'_, V>, DictError> {
        let arena = self.arena.borrow();
        let slot = treap::search(&arena, self.root, key).ok_or(DictError::KeyNotFound)?;
        Ok(Ref::map(arena, |arena| arena.value(slot)))
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_ok()
    }

    /// Writable slot for `key`, inserting `V::default()` if it is absent.
    ///
    /// An existing key keeps its entry and the returned guard points at
    /// its current value. The default is built before the tree is
    /// touched, so a panicking `V::default()` leaves the dictionary as it
    /// was.
    pub fn slot(&mut self, key: K) -> RefMut<'_, V>
    where
        V: Default,
    {
        let value = V::default();
        let mut arena = self.arena.borrow_mut();
        let slot = match place(&mut arena, &mut self.root, &key) {
            Placement::Fresh(slot) => {
                arena.fill(slot, key, value);
                slot
            }
            Placement::Existing(slot) => slot,
        };
        RefMut::map(arena, |arena| arena.value_mut(slot))
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut arena = self.arena.borrow_mut();
        match place(&mut arena, &mut self.root, &key) {
            Placement::Fresh(slot) => {
                arena.fill(slot, key, value);
                None
            }
            Placement::Existing(slot) => Some(arena.replace_value(slot, value)),
        }
    }

    /// Remove `key`, returning whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        let mut arena = self.arena.borrow_mut();
        let mut detached = None;
        self.root = treap::remove(&mut arena, self.root, key, &mut detached);
        match detached {
            Some(slot) => {
                arena.free(slot);
                true
            }
            None => false,
        }
    }

    /// Remove every entry, returning all slots to the arena.
    pub fn clear(&mut self) {
        let root = self.root.take();
        treap::clear(&mut self.arena.borrow_mut(), root);
    }

    /// Call `f` on every entry in ascending key order.
    pub fn for_each<F: FnMut(&K, &V)>(&self, mut f: F) {
        let arena = self.arena.borrow();
        for slot in InOrder::new(&arena, self.root) {
            f(arena.key(slot), arena.value(slot));
        }
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len());
        self.for_each(|k, _| keys.push(k.clone()));
        keys
    }

    /// All entries in ascending key order.
    pub fn to_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let mut entries = Vec::with_capacity(self.len());
        self.for_each(|k, v| entries.push((k.clone(), v.clone())));
        entries
    }

    /// Check every structural invariant of the tree.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        validate::check_tree(&self.arena.borrow(), self.root)
    }
}

impl<K, V> TreapDict<K, V> {
    /// The arena this dictionary allocates from.
    pub fn arena(&self) -> &SharedArena<K, V> {
        &self.arena
    }

    /// Slot of the tree root, if any.
    pub fn root_slot(&self) -> Option<SlotIndex> {
        self.root
    }
}

/// Allocate a slot eagerly and link it for `key`.
///
/// A duplicate key leaves the tree untouched; the unused slot goes straight
/// back to the free list so nothing leaks.
fn place<K: Ord, V>(
    arena: &mut NodeArena<K, V>,
    root: &mut Option<SlotIndex>,
    key: &K,
) -> Placement {
    let fresh = arena.allocate();
    let (new_root, placement) = treap::insert(arena, *root, fresh, key);
    *root = Some(new_root);
    if let Placement::Existing(_) = placement {
        arena.free(fresh);
    }
    placement
}

impl<K, V> Drop for TreapDict<K, V> {
    fn drop(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };
        match self.arena.try_borrow_mut() {
            Some(mut arena) => treap::clear(&mut arena, Some(root)),
            None => {
                debug!(
                    "dictionary dropped while its arena is borrowed; deferring release of tree at slot {root}"
                );
                self.arena.defer_release(root);
            }
        }
    }
}

impl<K: Ord, V> Default for TreapDict<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for TreapDict<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreapDict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        dict.extend(iter);
        dict
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for TreapDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = self.arena.borrow();
        f.debug_map()
            .entries(
                InOrder::new(&arena, self.root).map(|slot| (arena.key(slot), arena.value(slot))),
            )
            .finish()
    }
}
