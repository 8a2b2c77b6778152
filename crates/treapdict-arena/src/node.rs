//! Node slots stored in the arena.

use treapdict_core::SlotIndex;

/// A single slot of the node table.
///
/// While a slot is linked into a tree it carries a key/value entry, its
/// heap priority, its child links and the cached statistics of the
/// subtree it roots. While it sits on the free list the entry is empty
/// and `left` doubles as the link to the next free slot.
#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub(crate) entry: Option<(K, V)>,
    pub(crate) priority: u32,
    pub(crate) left: Option<SlotIndex>,
    pub(crate) right: Option<SlotIndex>,
    pub(crate) count: u32,
    pub(crate) height: u32,
    pub(crate) in_use: bool,
}

impl<K, V> Node<K, V> {
    /// A free slot whose free-list link points at `next_free`.
    pub(crate) fn vacant(next_free: Option<SlotIndex>) -> Self {
        Self {
            entry: None,
            priority: 0,
            left: next_free,
            right: None,
            count: 0,
            height: 0,
            in_use: false,
        }
    }

    /// Reinitialise a slot taken off the free list as a lone leaf.
    pub(crate) fn reset(&mut self, priority: u32) {
        self.priority = priority;
        self.left = None;
        self.right = None;
        self.count = 1;
        self.height = 1;
        self.in_use = true;
    }

    /// Heap priority drawn when the slot was allocated.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Left child, if any.
    pub fn left(&self) -> Option<SlotIndex> {
        self.left
    }

    /// Right child, if any.
    pub fn right(&self) -> Option<SlotIndex> {
        self.right
    }

    /// Number of slots in the subtree rooted here, including this one.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Height of the subtree rooted here; a lone leaf has height 1.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The stored key, if the slot has been filled.
    pub fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|(k, _)| k)
    }

    /// The stored value, if the slot has been filled.
    pub fn value(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, v)| v)
    }

    /// Whether the slot is currently allocated (not on the free list).
    pub fn is_in_use(&self) -> bool {
        self.in_use
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacant_slot_links_to_next() {
        let node: Node<u32, u32> = Node::vacant(Some(SlotIndex(5)));
        assert_eq!(node.left(), Some(SlotIndex(5)));
        assert!(!node.is_in_use());
        assert!(node.key().is_none());
    }

    #[test]
    fn reset_produces_leaf_stats() {
        let mut node: Node<u32, u32> = Node::vacant(Some(SlotIndex(1)));
        node.reset(99);
        assert_eq!(node.priority(), 99);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
        assert_eq!(node.count(), 1);
        assert_eq!(node.height(), 1);
        assert!(node.is_in_use());
    }
}
