//! Strongly-typed slot identifiers.

use std::fmt;

/// Identifies a node slot within a node arena.
///
/// Slot indices are stable for the lifetime of the arena: growth copies
/// existing slots into the low half of the enlarged table, so an index
/// handed out before a doubling still designates the same slot after it.
/// A missing child is represented as `Option::<SlotIndex>::None` rather than
/// a reserved sentinel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub u32);

impl SlotIndex {
    /// Largest index an arena may hand out.
    pub const MAX: SlotIndex = SlotIndex(u32::MAX - 1);

    /// The index as a `usize`, for addressing the backing table.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlotIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
