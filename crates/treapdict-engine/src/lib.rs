//! Treap engine for treapdict.
//!
//! Implements the randomized balanced search tree on top of the node arena
//! from `treapdict-arena`:
//!
//! - [`treap`]: insert/search/remove/rotate/clear on slot indices.
//! - [`dict`]: [`TreapDict`], the public ordered dictionary.
//! - [`validate`]: whole-tree invariant checks used by tests and tooling.
//!
//! Trees are binary search trees by key and min-heaps by the random
//! priority each slot draws at allocation, which keeps the expected height
//! logarithmic without explicit rebalancing rules.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dict;
pub mod treap;
pub mod validate;

pub use dict::TreapDict;
pub use treap::{InOrder, Placement};
