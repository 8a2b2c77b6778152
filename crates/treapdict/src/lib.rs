//! Treapdict: an ordered dictionary backed by an arena-allocated treap.
//!
//! This is the top-level facade crate that re-exports the public API from the
//! treapdict sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use treapdict::prelude::*;
//!
//! let mut dict: TreapDict<u32, String> = TreapDict::with_capacity(4);
//! *dict.slot(5) = "five".into();
//! dict.insert(3, "three".into());
//! assert_eq!(&*dict.search(&5).unwrap(), "five");
//! assert_eq!(dict.keys(), vec![3, 5]);
//!
//! // Several dictionaries may draw nodes from one arena.
//! let arena = SharedArena::new(&ArenaConfig::new(64));
//! let mut a: TreapDict<u32, u32> = TreapDict::new_in(&arena);
//! let mut b: TreapDict<u32, u32> = TreapDict::new_in(&arena);
//! a.insert(1, 10);
//! b.insert(1, 20);
//! assert_eq!(*a.search(&1).unwrap(), 10);
//! assert!(b.remove(&1));
//! assert_eq!(b.search(&1).unwrap_err(), DictError::KeyNotFound);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `treapdict-arena` | Node arena, shared handles, arena registry |
//! | [`types`] | `treapdict-core` | Slot indices and error types |
//! | [`engine`] | `treapdict-engine` | Treap algorithms, `TreapDict`, validation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Node storage (`treapdict-arena`).
///
/// [`arena::NodeArena`] owns the nodes; [`arena::SharedArena`] lets several
/// dictionaries allocate from the same one.
pub use treapdict_arena as arena;

/// Slot indices and errors (`treapdict-core`).
pub use treapdict_core as types;

/// Treap algorithms and the dictionary (`treapdict-engine`).
pub use treapdict_engine as engine;

/// Common imports for typical treapdict usage.
///
/// ```rust
/// use treapdict::prelude::*;
/// ```
pub mod prelude {
    pub use treapdict_arena::{ArenaConfig, SharedArena};
    pub use treapdict_core::{DictError, InvariantViolation};
    pub use treapdict_engine::TreapDict;
}
