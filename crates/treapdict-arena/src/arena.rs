//! The node arena: a growable slot table with an intrusive free list.
//!
//! [`NodeArena`] owns every node of every tree that allocates from it.
//! Trees refer to nodes by [`SlotIndex`] only. Free slots are chained
//! through their `left` link, so allocation and release are O(1) and need
//! no side table. When the chain runs dry the table doubles; existing
//! slots keep their indices.

use std::mem;

use log::debug;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use treapdict_core::SlotIndex;

use crate::config::ArenaConfig;
use crate::node::Node;

/// Slot table backing one or more treaps.
///
/// The arena never shrinks. Capacity grows only by doubling, and only
/// when [`NodeArena::allocate`] finds the free list empty.
pub struct NodeArena<K, V> {
    /// Every slot ever allocated, linked or free.
    nodes: Vec<Node<K, V>>,
    /// Head of the free chain.
    free_head: Option<SlotIndex>,
    free_count: u32,
    grow_count: u32,
    rng: ChaCha8Rng,
}

impl<K, V> NodeArena<K, V> {
    /// Create an arena with `config.effective_capacity()` free slots.
    pub fn new(config: &ArenaConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut arena = Self {
            nodes: Vec::new(),
            free_head: None,
            free_count: 0,
            grow_count: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        arena.append_free_slots(config.effective_capacity());
        debug!(
            "created node arena with {} slots (seed {seed})",
            arena.capacity()
        );
        arena
    }

    /// Take a slot off the free list, growing the table if necessary.
    ///
    /// The returned slot is a lone leaf: no children, `count == 1`,
    /// `height == 1`, no entry yet, and a freshly drawn priority.
    pub fn allocate(&mut self) -> SlotIndex {
        let slot = match self.free_head {
            Some(slot) => slot,
            None => self.grow(),
        };
        let priority = self.rng.next_u32();
        let node = &mut self.nodes[slot.as_usize()];
        debug_assert!(!node.in_use, "free list handed out live slot {slot}");
        self.free_head = node.left;
        node.reset(priority);
        self.free_count -= 1;
        slot
    }

    /// Return a slot to the free list.
    ///
    /// The slot's entry is dropped and its `left` link becomes the
    /// free-list link. The caller must already have unlinked the slot from
    /// every tree.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already free.
    pub fn free(&mut self, slot: SlotIndex) {
        let node = &mut self.nodes[slot.as_usize()];
        assert!(node.in_use, "double free of slot {slot}");
        node.entry = None;
        node.in_use = false;
        node.left = self.free_head;
        self.free_head = Some(slot);
        self.free_count += 1;
    }

    /// Free every slot of the tree under `root`, children before parents.
    pub fn free_tree(&mut self, root: Option<SlotIndex>) {
        if let Some(slot) = root {
            let (left, right) = (self.left(slot), self.right(slot));
            self.free_tree(left);
            self.free_tree(right);
            self.free(slot);
        }
    }

    /// Recompute `count` and `height` of `slot` from its children.
    ///
    /// Children must already carry correct statistics.
    pub fn adjust(&mut self, slot: SlotIndex) {
        let (left, right) = {
            let node = &self.nodes[slot.as_usize()];
            (node.left, node.right)
        };
        let (lc, lh) = self.stats(left);
        let (rc, rh) = self.stats(right);
        let node = &mut self.nodes[slot.as_usize()];
        node.count = 1 + lc + rc;
        node.height = 1 + lh.max(rh);
    }

    /// `(count, height)` of an optional subtree, zero for a missing one.
    #[inline]
    pub fn stats(&self, slot: Option<SlotIndex>) -> (u32, u32) {
        slot.map_or((0, 0), |s| {
            let node = &self.nodes[s.as_usize()];
            (node.count, node.height)
        })
    }

    /// Shared access to a slot.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is beyond the current capacity.
    #[inline]
    pub fn node(&self, slot: SlotIndex) -> &Node<K, V> {
        &self.nodes[slot.as_usize()]
    }

    /// Left child of `slot`.
    #[inline]
    pub fn left(&self, slot: SlotIndex) -> Option<SlotIndex> {
        self.nodes[slot.as_usize()].left
    }

    /// Right child of `slot`.
    #[inline]
    pub fn right(&self, slot: SlotIndex) -> Option<SlotIndex> {
        self.nodes[slot.as_usize()].right
    }

    /// Priority of `slot`.
    #[inline]
    pub fn priority(&self, slot: SlotIndex) -> u32 {
        self.nodes[slot.as_usize()].priority
    }

    /// Re-point the left child of `slot`.
    #[inline]
    pub fn set_left(&mut self, slot: SlotIndex, child: Option<SlotIndex>) {
        self.nodes[slot.as_usize()].left = child;
    }

    /// Re-point the right child of `slot`.
    #[inline]
    pub fn set_right(&mut self, slot: SlotIndex, child: Option<SlotIndex>) {
        self.nodes[slot.as_usize()].right = child;
    }

    /// Store the entry of a freshly allocated slot.
    pub fn fill(&mut self, slot: SlotIndex, key: K, value: V) {
        let node = &mut self.nodes[slot.as_usize()];
        debug_assert!(node.in_use, "filling free slot {slot}");
        node.entry = Some((key, value));
    }

    /// Key stored in a linked slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot has no entry, which only happens for free slots
    /// or slots that were allocated but never linked.
    #[inline]
    pub fn key(&self, slot: SlotIndex) -> &K {
        &self.entry(slot).0
    }

    /// Value stored in a linked slot.
    #[inline]
    pub fn value(&self, slot: SlotIndex) -> &V {
        &self.entry(slot).1
    }

    /// Mutable value stored in a linked slot.
    #[inline]
    pub fn value_mut(&mut self, slot: SlotIndex) -> &mut V {
        &mut self.nodes[slot.as_usize()]
            .entry
            .as_mut()
            .expect("linked slot always holds an entry")
            .1
    }

    /// Swap a new value into a linked slot, returning the old one.
    pub fn replace_value(&mut self, slot: SlotIndex, value: V) -> V {
        mem::replace(self.value_mut(slot), value)
    }

    fn entry(&self, slot: SlotIndex) -> &(K, V) {
        self.nodes[slot.as_usize()]
            .entry
            .as_ref()
            .expect("linked slot always holds an entry")
    }

    /// Whether `slot` is currently on the free list.
    pub fn is_free(&self, slot: SlotIndex) -> bool {
        !self.nodes[slot.as_usize()].in_use
    }

    /// Total number of slots, free or in use.
    pub fn capacity(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Number of slots on the free list.
    pub fn free_count(&self) -> u32 {
        self.free_count
    }

    /// Number of slots currently allocated.
    pub fn live_count(&self) -> u32 {
        self.capacity() - self.free_count
    }

    /// How many times the table has doubled.
    pub fn grow_count(&self) -> u32 {
        self.grow_count
    }

    /// Memory reserved by the slot table in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.nodes.capacity() * mem::size_of::<Node<K, V>>()
    }

    /// Double the table and return the head of the new free chain.
    fn grow(&mut self) -> SlotIndex {
        debug_assert!(self.free_head.is_none());
        let old = self.capacity();
        let limit = SlotIndex::MAX.0 + 1;
        let new = old.saturating_mul(2).min(limit);
        assert!(new > old, "node arena exhausted the slot index space");
        let head = self.append_free_slots(new - old);
        self.grow_count += 1;
        debug!("node arena grew from {old} to {new} slots");
        head
    }

    /// Push `additional` vacant slots chained in index order onto an empty
    /// free list. Returns the first new slot.
    fn append_free_slots(&mut self, additional: u32) -> SlotIndex {
        let start = self.capacity();
        let end = start + additional;
        self.nodes.reserve_exact(additional as usize);
        for i in start..end {
            let next = (i + 1 < end).then_some(SlotIndex(i + 1));
            self.nodes.push(Node::vacant(next));
        }
        let head = SlotIndex(start);
        self.free_head = Some(head);
        self.free_count += additional;
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(capacity: u32) -> NodeArena<u32, String> {
        NodeArena::new(&ArenaConfig::new(capacity).with_seed(1))
    }

    #[test]
    fn fresh_arena_is_all_free() {
        let a = arena(8);
        assert_eq!(a.capacity(), 8);
        assert_eq!(a.free_count(), 8);
        assert_eq!(a.live_count(), 0);
    }

    #[test]
    fn allocate_hands_out_slots_in_index_order() {
        let mut a = arena(4);
        let slots: Vec<_> = (0..4).map(|_| a.allocate()).collect();
        assert_eq!(
            slots,
            vec![SlotIndex(0), SlotIndex(1), SlotIndex(2), SlotIndex(3)]
        );
        assert_eq!(a.free_count(), 0);
    }

    #[test]
    fn allocated_slot_is_a_leaf() {
        let mut a = arena(4);
        let s = a.allocate();
        let node = a.node(s);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
        assert_eq!(node.count(), 1);
        assert_eq!(node.height(), 1);
        assert!(node.is_in_use());
    }

    #[test]
    fn freed_slot_is_reused_first() {
        let mut a = arena(4);
        let s0 = a.allocate();
        let _s1 = a.allocate();
        a.free(s0);
        assert!(a.is_free(s0));
        assert_eq!(a.allocate(), s0);
        assert_eq!(a.capacity(), 4);
    }

    #[test]
    fn free_drops_entry() {
        let mut a = arena(2);
        let s = a.allocate();
        a.fill(s, 3, "three".to_string());
        assert_eq!(a.value(s), "three");
        a.free(s);
        assert!(a.node(s).value().is_none());
    }

    #[test]
    #[should_panic(expected = "double free")]
    fn double_free_panics() {
        let mut a = arena(2);
        let s = a.allocate();
        a.free(s);
        a.free(s);
    }

    #[test]
    fn free_tree_releases_whole_subtree() {
        let mut a = arena(4);
        let root = a.allocate();
        let l = a.allocate();
        let r = a.allocate();
        a.set_left(root, Some(l));
        a.set_right(root, Some(r));
        a.free_tree(Some(root));
        assert_eq!(a.live_count(), 0);
        a.free_tree(None);
        assert_eq!(a.free_count(), 4);
    }

    #[test]
    fn exhaustion_doubles_capacity() {
        let mut a = arena(4);
        for _ in 0..4 {
            a.allocate();
        }
        let s = a.allocate();
        assert_eq!(s, SlotIndex(4));
        assert_eq!(a.capacity(), 8);
        assert_eq!(a.grow_count(), 1);
        assert_eq!(a.free_count(), 3);
    }

    #[test]
    fn growth_preserves_existing_slots() {
        let mut a = arena(2);
        let s0 = a.allocate();
        let s1 = a.allocate();
        a.fill(s0, 10, "ten".to_string());
        a.fill(s1, 20, "twenty".to_string());
        a.set_left(s1, Some(s0));
        a.adjust(s1);
        let p0 = a.priority(s0);

        let s2 = a.allocate();
        assert_eq!(a.capacity(), 4);
        assert_ne!(s2, s0);
        assert_ne!(s2, s1);
        assert_eq!(a.key(s0), &10);
        assert_eq!(a.value(s1), "twenty");
        assert_eq!(a.left(s1), Some(s0));
        assert_eq!(a.node(s1).count(), 2);
        assert_eq!(a.priority(s0), p0);
    }

    #[test]
    fn zero_capacity_still_allocates() {
        let mut a = arena(0);
        assert_eq!(a.capacity(), 1);
        a.allocate();
        a.allocate();
        assert_eq!(a.capacity(), 2);
    }

    #[test]
    fn adjust_combines_children() {
        let mut a = arena(4);
        let root = a.allocate();
        let l = a.allocate();
        let r = a.allocate();
        let rl = a.allocate();
        a.set_left(r, Some(rl));
        a.adjust(r);
        a.set_left(root, Some(l));
        a.set_right(root, Some(r));
        a.adjust(root);
        assert_eq!(a.node(root).count(), 4);
        assert_eq!(a.node(root).height(), 3);
        assert_eq!(a.stats(None), (0, 0));
    }

    #[test]
    fn replace_value_returns_old() {
        let mut a = arena(1);
        let s = a.allocate();
        a.fill(s, 1, "a".to_string());
        assert_eq!(a.replace_value(s, "b".to_string()), "a");
        assert_eq!(a.value(s), "b");
        a.value_mut(s).push('c');
        assert_eq!(a.value(s), "bc");
    }

    #[test]
    fn same_seed_draws_same_priorities() {
        let mut a = arena(4);
        let mut b = arena(4);
        for _ in 0..4 {
            let (sa, sb) = (a.allocate(), b.allocate());
            assert_eq!(a.priority(sa), b.priority(sb));
        }
    }

    #[test]
    fn memory_bytes_tracks_capacity() {
        let a = arena(16);
        assert!(a.memory_bytes() >= 16 * mem::size_of::<Node<u32, String>>());
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_plus_free_equals_capacity(
                ops in proptest::collection::vec(any::<bool>(), 1..200),
            ) {
                let mut a = arena(2);
                let mut live = Vec::new();
                for alloc in ops {
                    if alloc || live.is_empty() {
                        live.push(a.allocate());
                    } else {
                        a.free(live.swap_remove(0));
                    }
                    prop_assert_eq!(a.live_count() + a.free_count(), a.capacity());
                    prop_assert_eq!(a.live_count() as usize, live.len());
                }
            }

            #[test]
            fn capacity_is_initial_times_power_of_two(
                initial in 1u32..32,
                allocs in 0usize..300,
            ) {
                let mut a = arena(initial);
                for _ in 0..allocs {
                    a.allocate();
                }
                let ratio = a.capacity() / initial;
                prop_assert_eq!(a.capacity() % initial, 0);
                prop_assert!(ratio.is_power_of_two());
                prop_assert_eq!(ratio, 1 << a.grow_count());
            }

            #[test]
            fn live_slots_never_handed_out_twice(
                ops in proptest::collection::vec(0u8..3, 1..200),
            ) {
                let mut a = arena(3);
                let mut live = std::collections::HashSet::new();
                for op in ops {
                    if op > 0 || live.is_empty() {
                        let s = a.allocate();
                        prop_assert!(live.insert(s), "slot {} handed out twice", s);
                    } else {
                        let s = *live.iter().next().unwrap();
                        live.remove(&s);
                        a.free(s);
                    }
                }
            }
        }
    }
}
