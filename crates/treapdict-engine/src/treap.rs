//! Treap algorithms over arena slots.
//!
//! Every function here takes the arena and a subtree root and returns the
//! (possibly new) root of that subtree. Trees are binary search trees by
//! key and min-heaps by priority. After any structural change the
//! affected slots are `adjust`ed bottom-up so cached counts and heights
//! stay exact.
//!
//! Nothing in this module allocates or frees slots except [`clear`]; the
//! caller owns the decision of when a slot enters or leaves a tree.

use std::cmp::Ordering;

use smallvec::SmallVec;
use treapdict_arena::NodeArena;
use treapdict_core::SlotIndex;

/// Outcome of [`insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The fresh slot was linked into the tree.
    Fresh(SlotIndex),
    /// The key was already present at this slot; the fresh slot was not
    /// linked and the caller must release it.
    Existing(SlotIndex),
}

impl Placement {
    /// The slot that now holds the key.
    pub fn slot(self) -> SlotIndex {
        match self {
            Self::Fresh(slot) | Self::Existing(slot) => slot,
        }
    }
}

/// Find the slot holding `key`.
pub fn search<K: Ord, V>(
    arena: &NodeArena<K, V>,
    root: Option<SlotIndex>,
    key: &K,
) -> Option<SlotIndex> {
    let mut cursor = root;
    while let Some(slot) = cursor {
        cursor = match key.cmp(arena.key(slot)) {
            Ordering::Equal => return Some(slot),
            Ordering::Less => arena.left(slot),
            Ordering::Greater => arena.right(slot),
        };
    }
    None
}

/// Rotate `root` down to the left, lifting its right child `pivot`.
///
/// Returns `pivot`, the new subtree root.
pub fn rotate_left<K, V>(
    arena: &mut NodeArena<K, V>,
    root: SlotIndex,
    pivot: SlotIndex,
) -> SlotIndex {
    debug_assert_eq!(arena.right(root), Some(pivot));
    let inner = arena.left(pivot);
    arena.set_right(root, inner);
    arena.set_left(pivot, Some(root));
    arena.adjust(root);
    arena.adjust(pivot);
    pivot
}

/// Rotate `root` down to the right, lifting its left child `pivot`.
///
/// Returns `pivot`, the new subtree root.
pub fn rotate_right<K, V>(
    arena: &mut NodeArena<K, V>,
    root: SlotIndex,
    pivot: SlotIndex,
) -> SlotIndex {
    debug_assert_eq!(arena.left(root), Some(pivot));
    let inner = arena.right(pivot);
    arena.set_left(root, inner);
    arena.set_right(pivot, Some(root));
    arena.adjust(root);
    arena.adjust(pivot);
    pivot
}

/// Link the freshly allocated slot `fresh` under `root` for `key`.
///
/// `fresh` must be a lone leaf whose entry has not been filled yet; it is
/// never compared against. If `key` is already present the tree is left
/// untouched and [`Placement::Existing`] names the slot holding it.
///
/// Returns the new subtree root and where the key lives.
pub fn insert<K: Ord, V>(
    arena: &mut NodeArena<K, V>,
    root: Option<SlotIndex>,
    fresh: SlotIndex,
    key: &K,
) -> (SlotIndex, Placement) {
    let Some(slot) = root else {
        return (fresh, Placement::Fresh(fresh));
    };
    let (subtree, placement) = match key.cmp(arena.key(slot)) {
        Ordering::Equal => return (slot, Placement::Existing(slot)),
        Ordering::Less => {
            let left = arena.left(slot);
            let (child, placement) = insert(arena, left, fresh, key);
            arena.set_left(slot, Some(child));
            if arena.priority(child) < arena.priority(slot) {
                (rotate_right(arena, slot, child), placement)
            } else {
                (slot, placement)
            }
        }
        Ordering::Greater => {
            let right = arena.right(slot);
            let (child, placement) = insert(arena, right, fresh, key);
            arena.set_right(slot, Some(child));
            if arena.priority(child) < arena.priority(slot) {
                (rotate_left(arena, slot, child), placement)
            } else {
                (slot, placement)
            }
        }
    };
    arena.adjust(subtree);
    (subtree, placement)
}

/// Unlink the slot holding `key` from the subtree under `root`.
///
/// On a match the unlinked slot is written to `detached`; it is not freed
/// here because a two-child match is rotated down and revisited, and the
/// slot must reach the free list exactly once. Returns the new subtree
/// root. A missing key leaves the tree unchanged and `detached` untouched.
pub fn remove<K: Ord, V>(
    arena: &mut NodeArena<K, V>,
    root: Option<SlotIndex>,
    key: &K,
    detached: &mut Option<SlotIndex>,
) -> Option<SlotIndex> {
    let mut slot = root?;
    match key.cmp(arena.key(slot)) {
        Ordering::Less => {
            let left = arena.left(slot);
            let child = remove(arena, left, key, detached);
            arena.set_left(slot, child);
        }
        Ordering::Greater => {
            let right = arena.right(slot);
            let child = remove(arena, right, key, detached);
            arena.set_right(slot, child);
        }
        Ordering::Equal => {
            *detached = Some(slot);
            match (arena.left(slot), arena.right(slot)) {
                (None, right) => return right,
                (left, None) => return left,
                (Some(left), Some(right)) => {
                    // Lift the child with the smaller priority.
                    if arena.priority(left) < arena.priority(right) {
                        slot = rotate_right(arena, slot, left);
                        let below = arena.right(slot);
                        let child = remove(arena, below, key, detached);
                        arena.set_right(slot, child);
                    } else {
                        slot = rotate_left(arena, slot, right);
                        let below = arena.left(slot);
                        let child = remove(arena, below, key, detached);
                        arena.set_left(slot, child);
                    }
                }
            }
        }
    }
    arena.adjust(slot);
    Some(slot)
}

/// Free every slot of the subtree under `root`.
///
/// Children are released before their parent: freeing a slot overwrites
/// its `left` link with the free-list link.
pub fn clear<K, V>(arena: &mut NodeArena<K, V>, root: Option<SlotIndex>) {
    arena.free_tree(root);
}

/// In-order (ascending key) walk over the slots of a tree.
///
/// Iterative with an explicit stack, so deep trees cannot exhaust the
/// call stack.
pub struct InOrder<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    stack: SmallVec<[SlotIndex; 64]>,
    cursor: Option<SlotIndex>,
}

impl<'a, K, V> InOrder<'a, K, V> {
    /// Start a walk at `root`.
    pub fn new(arena: &'a NodeArena<K, V>, root: Option<SlotIndex>) -> Self {
        Self {
            arena,
            stack: SmallVec::new(),
            cursor: root,
        }
    }
}

impl<K, V> Iterator for InOrder<'_, K, V> {
    type Item = SlotIndex;

    fn next(&mut self) -> Option<SlotIndex> {
        while let Some(slot) = self.cursor {
            self.stack.push(slot);
            self.cursor = self.arena.left(slot);
        }
        let slot = self.stack.pop()?;
        self.cursor = self.arena.right(slot);
        Some(slot)
    }
}
