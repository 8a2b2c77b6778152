//! Structural checks for treaps stored in a node arena.
//!
//! [`check_tree`] verifies a single tree; [`check_forest`] verifies several
//! trees sharing one arena and additionally rejects slots reachable from
//! more than one root. Both walk the whole tree, so they are meant for
//! tests and debugging, not hot paths.

use std::collections::HashSet;

use treapdict_arena::NodeArena;
use treapdict_core::{InvariantViolation, SlotIndex};

use crate::treap::InOrder;

/// Verify key order, heap order, cached statistics and slot ownership of
/// the tree rooted at `root`.
pub fn check_tree<K: Ord, V>(
    arena: &NodeArena<K, V>,
    root: Option<SlotIndex>,
) -> Result<(), InvariantViolation> {
    check_forest(arena, &[root])
}

/// Like [`check_tree`] for every root in `roots`, with the added
/// requirement that no slot belongs to two trees.
pub fn check_forest<K: Ord, V>(
    arena: &NodeArena<K, V>,
    roots: &[Option<SlotIndex>],
) -> Result<(), InvariantViolation> {
    let mut seen = HashSet::new();
    for &root in roots {
        check_structure(arena, root, &mut seen)?;
        check_order(arena, root)?;
    }
    Ok(())
}

/// Returns the recomputed `(count, height)` of the subtree.
fn check_structure<K, V>(
    arena: &NodeArena<K, V>,
    root: Option<SlotIndex>,
    seen: &mut HashSet<SlotIndex>,
) -> Result<(u32, u32), InvariantViolation> {
    let Some(slot) = root else {
        return Ok((0, 0));
    };
    if !seen.insert(slot) {
        return Err(InvariantViolation::SlotReachableTwice { slot });
    }
    if arena.is_free(slot) {
        return Err(InvariantViolation::FreeSlotReachable { slot });
    }

    let node = arena.node(slot);
    for child in [node.left(), node.right()].into_iter().flatten() {
        if arena.priority(child) < node.priority() {
            return Err(InvariantViolation::HeapViolation {
                parent: slot,
                child,
            });
        }
    }

    let (left_count, left_height) = check_structure(arena, node.left(), seen)?;
    let (right_count, right_height) = check_structure(arena, node.right(), seen)?;
    let count = 1 + left_count + right_count;
    let height = 1 + left_height.max(right_height);

    if node.count() != count {
        return Err(InvariantViolation::CountMismatch {
            slot,
            cached: node.count(),
            actual: count,
        });
    }
    if node.height() != height {
        return Err(InvariantViolation::HeightMismatch {
            slot,
            cached: node.height(),
            actual: height,
        });
    }
    Ok((count, height))
}

fn check_order<K: Ord, V>(
    arena: &NodeArena<K, V>,
    root: Option<SlotIndex>,
) -> Result<(), InvariantViolation> {
    let mut prev: Option<&K> = None;
    for slot in InOrder::new(arena, root) {
        let key = arena.key(slot);
        if prev.is_some_and(|p| p >= key) {
            return Err(InvariantViolation::OrderViolation { slot });
        }
        prev = Some(key);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treap::{self, Placement};
    use treapdict_arena::ArenaConfig;

    fn build(keys: &[u32]) -> (NodeArena<u32, ()>, Option<SlotIndex>) {
        let mut arena = NodeArena::new(&ArenaConfig::new(4).with_seed(3));
        let mut root = None;
        for &k in keys {
            let fresh = arena.allocate();
            let (r, placement) = treap::insert(&mut arena, root, fresh, &k);
            root = Some(r);
            match placement {
                Placement::Fresh(slot) => arena.fill(slot, k, ()),
                Placement::Existing(_) => arena.free(fresh),
            }
        }
        (arena, root)
    }

    #[test]
    fn well_formed_tree_passes() {
        let (arena, root) = build(&[9, 2, 7, 4, 4, 1, 8]);
        assert_eq!(check_tree(&arena, root), Ok(()));
        assert_eq!(check_tree(&arena, None), Ok(()));
    }

    #[test]
    fn stale_count_is_reported() {
        let (mut arena, root) = build(&[1, 2, 3, 4, 5]);
        let root = root.unwrap();
        // Graft a detached leaf without adjusting the parent chain.
        let extra = arena.allocate();
        arena.fill(extra, 100, ());
        let mut tail = root;
        while let Some(next) = arena.right(tail) {
            tail = next;
        }
        arena.set_right(tail, Some(extra));
        // The grafted priority is random, so the heap check may fire first.
        let err = check_tree(&arena, Some(root)).unwrap_err();
        assert!(matches!(
            err,
            InvariantViolation::CountMismatch { .. } | InvariantViolation::HeapViolation { .. }
        ));
    }

    #[test]
    fn freed_slot_in_tree_is_reported() {
        let (mut arena, root) = build(&[1]);
        let root = root.unwrap();
        arena.free(root);
        assert_eq!(
            check_tree(&arena, Some(root)),
            Err(InvariantViolation::FreeSlotReachable { slot: root })
        );
    }

    #[test]
    fn shared_slot_across_roots_is_reported() {
        let (arena, root) = build(&[1, 2, 3]);
        let err = check_forest(&arena, &[root, root]).unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::SlotReachableTwice {
                slot: root.unwrap()
            }
        );
    }

    #[test]
    fn swapped_keys_break_order() {
        let mut arena: NodeArena<u32, ()> = NodeArena::new(&ArenaConfig::new(2).with_seed(1));
        let parent = arena.allocate();
        let child = arena.allocate();
        // Make the heap order valid regardless of the drawn priorities.
        let (top, below) = if arena.priority(parent) <= arena.priority(child) {
            (parent, child)
        } else {
            (child, parent)
        };
        arena.fill(top, 1, ());
        arena.fill(below, 5, ());
        // 5 placed as the right child of 1 is valid; as the left child it is not.
        arena.set_left(top, Some(below));
        arena.adjust(top);
        assert_eq!(
            check_tree(&arena, Some(top)),
            Err(InvariantViolation::OrderViolation { slot: top })
        );
    }
}
