//! Error types for the treapdict workspace.
//!
//! Organised by subsystem: lookup errors surfaced by the dictionary API,
//! and structural violations reported by the invariant checker.

use std::error::Error;
use std::fmt;

use crate::id::SlotIndex;

/// Errors returned by dictionary lookups.
///
/// Lookup misses are the only recoverable failure of the dictionary.
/// Arena exhaustion is fatal and never surfaces as a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DictError {
    /// The requested key is not present in the dictionary.
    KeyNotFound,
}

impl fmt::Display for DictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound => write!(f, "key not found"),
        }
    }
}

impl Error for DictError {}

/// A structural invariant of a treap that does not hold.
///
/// Produced by the tree checker. A correct engine never yields one of
/// these; they exist so tests and debug tooling can report *which* slot
/// is corrupt instead of a bare `false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// In-order traversal is not strictly increasing at this slot.
    OrderViolation {
        /// The slot whose key is out of order.
        slot: SlotIndex,
    },
    /// A child carries a smaller priority than its parent.
    HeapViolation {
        /// The parent slot.
        parent: SlotIndex,
        /// The offending child slot.
        child: SlotIndex,
    },
    /// The cached subtree count disagrees with the actual subtree.
    CountMismatch {
        /// The slot with the stale count.
        slot: SlotIndex,
        /// Value stored in the slot.
        cached: u32,
        /// Value recomputed from the children.
        actual: u32,
    },
    /// The cached subtree height disagrees with the actual subtree.
    HeightMismatch {
        /// The slot with the stale height.
        slot: SlotIndex,
        /// Value stored in the slot.
        cached: u32,
        /// Value recomputed from the children.
        actual: u32,
    },
    /// A slot reachable from the root is also on the free list.
    FreeSlotReachable {
        /// The slot that is both linked and free.
        slot: SlotIndex,
    },
    /// A slot is reachable along more than one path.
    SlotReachableTwice {
        /// The shared slot.
        slot: SlotIndex,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderViolation { slot } => {
                write!(f, "key order violated at slot {slot}")
            }
            Self::HeapViolation { parent, child } => {
                write!(
                    f,
                    "heap order violated: child {child} has lower priority than parent {parent}"
                )
            }
            Self::CountMismatch {
                slot,
                cached,
                actual,
            } => {
                write!(f, "slot {slot} caches count {cached}, subtree holds {actual}")
            }
            Self::HeightMismatch {
                slot,
                cached,
                actual,
            } => {
                write!(f, "slot {slot} caches height {cached}, subtree is {actual} tall")
            }
            Self::FreeSlotReachable { slot } => {
                write!(f, "slot {slot} is reachable but sits on the free list")
            }
            Self::SlotReachableTwice { slot } => {
                write!(f, "slot {slot} is reachable along two paths")
            }
        }
    }
}

impl Error for InvariantViolation {}
